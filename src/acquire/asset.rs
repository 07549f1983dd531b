//! Release asset naming.

use crate::error::Error;
use crate::platform::TargetKey;

/// Release asset published for each target.
const ARTIFACTS: &[(TargetKey, &str)] = &[
    (TargetKey::DarwinX64, "phantom-darwin-amd64"),
    (TargetKey::DarwinArm64, "phantom-darwin-arm64"),
    (TargetKey::LinuxX64, "phantom-linux-amd64"),
    (TargetKey::LinuxArm64, "phantom-linux-arm64"),
    (TargetKey::Win32X64, "phantom-windows-amd64.exe"),
];

/// Looks up the asset for `key`. A target without a published asset is unsupported.
pub fn asset_name(key: TargetKey) -> Result<&'static str, Error> {
    ARTIFACTS
        .iter()
        .find(|(target, _)| *target == key)
        .map(|(_, asset)| *asset)
        .ok_or_else(|| Error::UnsupportedPlatform {
            key: key.to_string(),
        })
}

/// `<base>/v<release>/<asset>`
pub fn release_url(base_url: &str, release: &str, asset: &str) -> String {
    format!("{}/v{}/{}", base_url.trim_end_matches('/'), release, asset)
}
