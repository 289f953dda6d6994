//! Output paths for inline-script assets.

use std::path::Path;

use crate::constants::WXS_PATH_INFIX;
use crate::fragment::WxsAsset;
use crate::utils::fs::replace_extension;

/// Give every asset its own path next to the page: the page extension is
/// replaced by `-wxs-<name><script_ext>`.
///
/// Names are not validated here.
#[must_use]
pub fn relocate(assets: &[WxsAsset], page: &Path, script_ext: &str) -> Vec<WxsAsset> {
    assets
        .iter()
        .map(|asset| WxsAsset {
            path: replace_extension(page, &format!("{WXS_PATH_INFIX}{}{script_ext}", asset.name)),
            ..asset.clone()
        })
        .collect()
}
