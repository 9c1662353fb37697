// SPDX-License-Identifier: MPL-2.0
use style_clone::app::{self, paths, Flags};
use style_clone::logging;

const HELP: &str = "\
StyleClone: apply the style of one image to another

USAGE:
  style_clone [OPTIONS]

OPTIONS:
  --endpoint <URL>        Synthesis service URL (selects the HTTP backend)
  --timeout <SECS>        Generation timeout in seconds
  --config-dir <PATH>     Directory holding settings.toml
  --data-dir <PATH>       Directory holding preferences and dialog state
  --log-level <FILTER>    Log filter, e.g. debug or style_clone=trace
  -h, --help              Print this help
";

struct Args {
    flags: Flags,
    config_dir: Option<String>,
    data_dir: Option<String>,
    log_level: Option<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        flags: Flags {
            endpoint: args.opt_value_from_str("--endpoint")?,
            timeout_secs: args.opt_value_from_str("--timeout")?,
        },
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        log_level: args.opt_value_from_str("--log-level")?,
    };

    let rest = args.finish();
    if let Some(unexpected) = rest.first() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected argument {}", unexpected.to_string_lossy()),
        });
    }

    Ok(Some(parsed))
}

fn main() -> iced::Result {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    if let Err(err) = logging::init(args.log_level.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }

    if let Err(err) = paths::init_cli_overrides(args.data_dir, args.config_dir) {
        tracing::error!(error = %err, "invalid directory override");
        std::process::exit(2);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    app::run(args.flags)
}
