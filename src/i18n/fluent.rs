// SPDX-License-Identifier: MPL-2.0
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundle: FluentBundle<FluentResource>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("current_locale", &self.current_locale)
            .field("available_locales", &self.available_locales)
            .finish_non_exhaustive()
    }
}

impl I18n {
    /// Loads the embedded `.ftl` files and selects `requested` if it is one
    /// of them, the default locale otherwise.
    pub fn new(requested: Option<&str>) -> Self {
        let available_locales = embedded_locales();
        let default_locale = parse_locale(DEFAULT_LOCALE).unwrap_or_default();
        let current_locale = requested
            .and_then(parse_locale)
            .filter(|locale| available_locales.contains(locale))
            .unwrap_or(default_locale);

        let mut bundle = FluentBundle::new_concurrent(vec![current_locale.clone()]);
        // Plain output, no Unicode isolation marks around arguments
        bundle.set_use_isolating(false);
        if let Some(resource) = load_resource(&current_locale) {
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(?errors, locale = %current_locale, "duplicate i18n messages");
            }
        }

        Self {
            bundle,
            available_locales,
            current_locale,
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Whether the bundle has a message for `key`.
    pub fn has_message(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }

    /// Text for `key`. A key without a message comes back verbatim.
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Text for `key` with `{ $name }` variables filled in.
    pub fn tr_with_args<K, V>(&self, key: &str, args: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(name.as_ref().to_string(), value.as_ref().to_string());
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        let Some(pattern) = self.bundle.get_message(key).and_then(|msg| msg.value()) else {
            return key.to_string();
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::debug!(key, ?errors, "i18n message formatted with errors");
        }
        value.into_owned()
    }
}

fn parse_locale(value: &str) -> Option<LanguageIdentifier> {
    value.parse::<LanguageIdentifier>().ok()
}

fn embedded_locales() -> Vec<LanguageIdentifier> {
    Asset::iter()
        .filter_map(|file| file.strip_suffix(".ftl").and_then(parse_locale))
        .collect()
}

fn load_resource(locale: &LanguageIdentifier) -> Option<FluentResource> {
    let file = Asset::get(&format!("{locale}.ftl"))?;
    let source = String::from_utf8_lossy(file.data.as_ref()).into_owned();
    match FluentResource::try_new(source) {
        Ok(resource) => Some(resource),
        Err((resource, errors)) => {
            tracing::warn!(?errors, %locale, "i18n resource has syntax errors");
            Some(resource)
        }
    }
}
