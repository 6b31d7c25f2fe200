// Dashboard preference toggles. Independent booleans, no cross-invariants.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Notifications,
    /// Presentation theme only
    ComfortMode,
    AutoScan,
    StrongerEncryption,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Notifications,
        SettingKey::StrongerEncryption,
        SettingKey::ComfortMode,
        SettingKey::AutoScan,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::Notifications => "Live Alerts",
            SettingKey::ComfortMode => "Eye Comfort Mode",
            SettingKey::AutoScan => "Auto-Scan Links",
            SettingKey::StrongerEncryption => "Double Encryption",
        }
    }

    /// Short name accepted by the console's `toggle` command.
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::Notifications => "notifications",
            SettingKey::ComfortMode => "comfort",
            SettingKey::AutoScan => "autoscan",
            SettingKey::StrongerEncryption => "encryption",
        }
    }
}

impl FromStr for SettingKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notifications" | "alerts" => Ok(SettingKey::Notifications),
            "comfort" | "comfort-mode" | "comfortmode" => Ok(SettingKey::ComfortMode),
            "autoscan" | "auto-scan" => Ok(SettingKey::AutoScan),
            "encryption" | "stronger-encryption" => Ok(SettingKey::StrongerEncryption),
            other => anyhow::bail!(
                "Unknown setting '{other}'. Expected one of: notifications, comfort, autoscan, encryption"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub notifications: bool,
    pub comfort_mode: bool,
    pub auto_scan: bool,
    pub stronger_encryption: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            comfort_mode: false,
            auto_scan: false,
            stronger_encryption: true,
        }
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Notifications => self.notifications,
            SettingKey::ComfortMode => self.comfort_mode,
            SettingKey::AutoScan => self.auto_scan,
            SettingKey::StrongerEncryption => self.stronger_encryption,
        }
    }

    /// Flip one setting and return its new value.
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let slot = match key {
            SettingKey::Notifications => &mut self.notifications,
            SettingKey::ComfortMode => &mut self.comfort_mode,
            SettingKey::AutoScan => &mut self.auto_scan,
            SettingKey::StrongerEncryption => &mut self.stronger_encryption,
        };
        *slot = !*slot;
        *slot
    }
}
