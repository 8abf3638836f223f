//! # Configuration
//!
//! Engine options, stored as `config.json` in the config directory. A missing file
//! means defaults; a file that only sets some keys gets defaults for the rest.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `5000` | Code points per visible page |
//! | `batch_size` | `1000` | Tokens (or characters) processed per chunk |
//! | `encoding.profile` | `custom` | Named codec preset: `custom`, `general` or `huawei` |
//! | `encoding.salt` | `Yout_Salt` | Salt for the numeric codec |
//! | `encoding.min_length` | `12` | Minimum length of an encoded id, at most 64 |
//! | `encoding.alphabet` | 62-char `DEFAULT_ALPHABET` | Lowercase, uppercase, then `1234567890` |
//! | `encoding.prefix` | empty | Fixed text in front of every encoded id |
//!
//! Presets:
//!
//! | Profile | Salt | Min length | Alphabet | Prefix |
//! |---------|------|------------|----------|--------|
//! | `general` | `Tongyong` | `12` | `DEFAULT_ALPHABET` | none |
//! | `huawei` | `Huawei` | `16` | `a-z` then `1234567890` | `haot` |
//!
//! With a named profile the preset's salt, minimum length and alphabet win over
//! the stored fields. Selecting a profile copies its values (prefix included) into
//! the fields; setting any codec field by hand switches back to `custom`.
//!
//! Values are read once when a session starts. Changing the salt, alphabet or
//! minimum length makes previously encoded ids undecodable.

use crate::codec::{Codec, DEFAULT_ALPHABET, DEFAULT_MIN_LENGTH, DEFAULT_SALT};
use crate::error::{OpkitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_PAGE_SIZE: usize = 5000;
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Keys accepted by [`OpkitConfig::get`] and [`OpkitConfig::set`].
pub const KEYS: &[&str] = &[
    "page-size",
    "batch-size",
    "profile",
    "salt",
    "min-length",
    "alphabet",
    "prefix",
];

const HUAWEI_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz1234567890";

/// Named codec presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingProfile {
    /// Salt, minimum length and alphabet come from the config fields.
    #[default]
    Custom,
    General,
    Huawei,
}

/// Codec parameters after the profile has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingSettings<'a> {
    pub salt: &'a str,
    pub min_length: usize,
    pub alphabet: &'a str,
}

impl EncodingProfile {
    pub const ALL: [EncodingProfile; 3] = [
        EncodingProfile::Custom,
        EncodingProfile::General,
        EncodingProfile::Huawei,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EncodingProfile::Custom => "custom",
            EncodingProfile::General => "general",
            EncodingProfile::Huawei => "huawei",
        }
    }

    /// The preset's codec parameters. `None` for `Custom`.
    pub fn preset(self) -> Option<EncodingSettings<'static>> {
        match self {
            EncodingProfile::Custom => None,
            EncodingProfile::General => Some(EncodingSettings {
                salt: "Tongyong",
                min_length: 12,
                alphabet: DEFAULT_ALPHABET,
            }),
            EncodingProfile::Huawei => Some(EncodingSettings {
                salt: "Huawei",
                min_length: 16,
                alphabet: HUAWEI_ALPHABET,
            }),
        }
    }

    pub fn default_prefix(self) -> &'static str {
        match self {
            EncodingProfile::Huawei => "haot",
            _ => "",
        }
    }
}

impl fmt::Display for EncodingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingProfile {
    type Err = OpkitError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|profile| profile.name() == wanted)
            .ok_or_else(|| {
                OpkitError::Config(format!(
                    "unknown profile '{}' (expected one of: custom, general, huawei)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpkitConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default)]
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncodingConfig {
    #[serde(default)]
    pub profile: EncodingProfile,

    #[serde(default = "default_salt")]
    pub salt: String,

    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    #[serde(default)]
    pub prefix: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_salt() -> String {
    DEFAULT_SALT.to_string()
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            profile: EncodingProfile::Custom,
            salt: default_salt(),
            min_length: default_min_length(),
            alphabet: default_alphabet(),
            prefix: String::new(),
        }
    }
}

impl EncodingConfig {
    /// A config holding the profile's preset values. `Custom` gives the defaults.
    pub fn for_profile(profile: EncodingProfile) -> Self {
        let mut config = Self::default();
        config.apply_profile(profile);
        config
    }

    /// Switches to `profile`, copying its preset into the fields.
    pub fn apply_profile(&mut self, profile: EncodingProfile) {
        self.profile = profile;
        if let Some(preset) = profile.preset() {
            self.salt = preset.salt.to_string();
            self.min_length = preset.min_length;
            self.alphabet = preset.alphabet.to_string();
        }
        self.prefix = profile.default_prefix().to_string();
    }

    /// The parameters the codec is built from.
    pub fn effective(&self) -> EncodingSettings<'_> {
        self.profile.preset().unwrap_or(EncodingSettings {
            salt: &self.salt,
            min_length: self.min_length,
            alphabet: &self.alphabet,
        })
    }
}

impl Default for OpkitConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            encoding: EncodingConfig::default(),
        }
    }
}

impl OpkitConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: OpkitConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        self.validate()?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(OpkitError::Config("page_size must be greater than 0".into()));
        }
        if self.batch_size == 0 {
            return Err(OpkitError::Config("batch_size must be greater than 0".into()));
        }
        Codec::from_config(&self.encoding).map(|_| ())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "page-size" => Ok(self.page_size.to_string()),
            "batch-size" => Ok(self.batch_size.to_string()),
            "profile" => Ok(self.encoding.profile.to_string()),
            "salt" => Ok(self.encoding.effective().salt.to_string()),
            "min-length" => Ok(self.encoding.effective().min_length.to_string()),
            "alphabet" => Ok(self.encoding.effective().alphabet.to_string()),
            "prefix" => Ok(self.encoding.prefix.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "page-size" => next.page_size = parse_count(key, value)?,
            "batch-size" => next.batch_size = parse_count(key, value)?,
            "profile" => next.encoding.apply_profile(value.parse()?),
            "salt" => next.custom_encoding().salt = value.to_string(),
            "min-length" => next.custom_encoding().min_length = parse_count(key, value)?,
            "alphabet" => next.custom_encoding().alphabet = value.to_string(),
            "prefix" => next.encoding.prefix = value.to_string(),
            other => return Err(unknown_key(other)),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn custom_encoding(&mut self) -> &mut EncodingConfig {
        if let Some(preset) = self.encoding.profile.preset() {
            self.encoding.salt = preset.salt.to_string();
            self.encoding.min_length = preset.min_length;
            self.encoding.alphabet = preset.alphabet.to_string();
            self.encoding.profile = EncodingProfile::Custom;
        }
        &mut self.encoding
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| OpkitError::Config(format!("{} expects a whole number, got '{}'", key, value)))
}

fn unknown_key(key: &str) -> OpkitError {
    OpkitError::Config(format!(
        "unknown key '{}' (expected one of: {})",
        key,
        KEYS.join(", ")
    ))
}
