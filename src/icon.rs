// SPDX-License-Identifier: MPL-2.0
//! Window icon, rasterized from the embedded brand SVG.

use iced::window::{icon, Icon};
use resvg::usvg;

const ICON_SIZE: u32 = 128;

/// Returns `None` if the SVG cannot be parsed or rendered.
pub fn load_window_icon() -> Option<Icon> {
    const SVG_SOURCE: &str = include_str!("../assets/branding/style_clone.svg");

    let tree = usvg::Tree::from_data(SVG_SOURCE.as_bytes(), &usvg::Options::default()).ok()?;
    let pixmap = render(&tree, ICON_SIZE)?;
    icon::from_rgba(pixmap.data().to_vec(), ICON_SIZE, ICON_SIZE).ok()
}

fn render(tree: &usvg::Tree, target: u32) -> Option<tiny_skia::Pixmap> {
    let size = tree.size();
    #[allow(clippy::cast_precision_loss)]
    let transform = tiny_skia::Transform::from_scale(
        target as f32 / size.width(),
        target as f32 / size.height(),
    );
    let mut pixmap = tiny_skia::Pixmap::new(target, target)?;
    resvg::render(tree, transform, &mut pixmap.as_mut());
    Some(pixmap)
}
