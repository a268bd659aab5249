use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use derive_more::{Display, Error, From};
use serde::Deserialize;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "TRIANGLE_CONFIG";

/// Config file looked up in the working directory when [`CONFIG_ENV`] is not set.
pub const DEFAULT_CONFIG_FILE: &str = "triangle.yaml";

/// Shortest tick a scene may run at (10 kHz).
pub const MIN_TICK_DURATION: Duration = Duration::from_micros(100);

/// Longest tick a scene may run at.
pub const MAX_TICK_DURATION: Duration = Duration::from_secs(60);

/// Top-level configuration of the demo.
/// Every field is optional in the YAML document.
#[derive(Clone, PartialEq, Default, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub graphics: GraphicsConfig,
    pub scene: SceneConfig,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Triangle"),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Default, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphicsConfig {
    pub backend: Backend,
    /// Waits for vertical blank before presenting.
    pub vsync: bool,
    pub power_preference: PowerPreference,
}

#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Scene updates per second.
    pub tick_rate: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { tick_rate: 240.0 }
    }
}

impl SceneConfig {
    /// Duration of a single tick.
    /// Fails unless it falls within [`MIN_TICK_DURATION`] and [`MAX_TICK_DURATION`].
    pub fn tick_duration(&self) -> Result<Duration, InvalidConfig> {
        let invalid = InvalidConfig::TickRate(self.tick_rate);
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(invalid);
        }
        let duration = Duration::try_from_secs_f32(1.0 / self.tick_rate).map_err(|_| invalid)?;
        if duration < MIN_TICK_DURATION || duration > MAX_TICK_DURATION {
            return Err(invalid);
        }
        Ok(duration)
    }
}

/// Graphics API used to talk to the GPU.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Honors `WGPU_BACKEND`, otherwise lets the adapter request pick any backend.
    #[default]
    Auto,
    Dx11,
    Dx12,
    Vulkan,
    Metal,
    Gl,
}

impl Backend {
    pub fn to_wgpu(self) -> wgpu::Backends {
        match self {
            Backend::Auto   => wgpu::util::backend_bits_from_env().unwrap_or(wgpu::Backends::all()),
            Backend::Dx11   => wgpu::Backends::DX11,
            Backend::Dx12   => wgpu::Backends::DX12,
            Backend::Vulkan => wgpu::Backends::VULKAN,
            Backend::Metal  => wgpu::Backends::METAL,
            Backend::Gl     => wgpu::Backends::GL,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerPreference {
    #[default]
    HighPerformance,
    LowPower,
}

impl PowerPreference {
    pub fn to_wgpu(self) -> wgpu::PowerPreference {
        match self {
            PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
            PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
        }
    }
}

impl DemoConfig {

    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading config from {}", path.display());
        Self::from_yaml(&yaml)
    }

    /**
     * Loads the file named by [`CONFIG_ENV`] if set.
     * Otherwise loads [`DEFAULT_CONFIG_FILE`] if it exists.
     * Otherwise falls back to defaults.
     */
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(PathBuf::from(path));
        }
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            return Self::load(path);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(InvalidConfig::WindowSize {
                width: self.window.width,
                height: self.window.height,
            }));
        }
        self.scene.tick_duration()?;
        Ok(())
    }
}


#[derive(Error, Display, From, Debug)]
pub enum ConfigError {
    #[display(fmt="Failed to read config {}", "path.display()")]
    #[from(ignore)]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[display(fmt="Failed to parse config: {}", _0)]
    Parse(serde_yaml::Error),
    #[display(fmt="Invalid config: {}", _0)]
    Invalid(InvalidConfig),
}

#[derive(Error, Display, Copy, Clone, PartialEq, Debug)]
pub enum InvalidConfig {
    #[display(fmt="window size {width}x{height} must be non-zero")]
    WindowSize { width: u32, height: u32 },
    #[display(fmt="tick rate {} must be between 1/60 and 10000 ticks per second", _0)]
    TickRate(#[error(not(source))] f32),
}


#[cfg(test)]
mod test {
    use std::time::Duration;
    use crate::{Backend, ConfigError, DemoConfig, InvalidConfig, PowerPreference, SceneConfig, CONFIG_ENV};

    #[test]
    fn empty_document_uses_defaults() {
        let config = DemoConfig::from_yaml("{}").unwrap();
        assert_eq!(DemoConfig::default(), config);
        assert_eq!("Triangle", config.window.title);
        assert_eq!((800, 600), (config.window.width, config.window.height));
        assert_eq!(Backend::Auto, config.graphics.backend);
        assert!(!config.graphics.vsync);
        assert_eq!(240.0, config.scene.tick_rate);
    }

    #[test]
    fn partial_document() {
        let yaml =
"window:
  title: Hello
  width: 1024
graphics:
  backend: dx11
  vsync: true
  power_preference: low_power
scene:
  tick_rate: 60";
        let config = DemoConfig::from_yaml(yaml).unwrap();
        assert_eq!("Hello", config.window.title);
        assert_eq!(1024, config.window.width);
        assert_eq!(600, config.window.height);
        assert_eq!(Backend::Dx11, config.graphics.backend);
        assert_eq!(wgpu::Backends::DX11, config.graphics.backend.to_wgpu());
        assert!(config.graphics.vsync);
        assert_eq!(PowerPreference::LowPower, config.graphics.power_preference);
        assert_eq!(60.0, config.scene.tick_rate);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = DemoConfig::from_yaml("window:\n  colour: red");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn zero_window_size_is_invalid() {
        let result = DemoConfig::from_yaml("window:\n  height: 0");
        match result {
            Err(ConfigError::Invalid(InvalidConfig::WindowSize { width, height })) => {
                assert_eq!((800, 0), (width, height));
            },
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[test]
    fn non_positive_tick_rate_is_invalid() {
        let result = DemoConfig::from_yaml("scene:\n  tick_rate: -1.0");
        assert!(matches!(result, Err(ConfigError::Invalid(InvalidConfig::TickRate(_)))));
        let result = DemoConfig::from_yaml("scene:\n  tick_rate: .nan");
        assert!(matches!(result, Err(ConfigError::Invalid(InvalidConfig::TickRate(_)))));
    }

    #[test]
    fn out_of_range_tick_rate_is_invalid() {
        let result = DemoConfig::from_yaml("scene:\n  tick_rate: 1.0e10");
        assert!(matches!(result, Err(ConfigError::Invalid(InvalidConfig::TickRate(_)))));
        let result = DemoConfig::from_yaml("scene:\n  tick_rate: 1.0e-30");
        assert!(matches!(result, Err(ConfigError::Invalid(InvalidConfig::TickRate(_)))));
    }

    #[test]
    fn tick_duration_from_rate() {
        let duration = SceneConfig::default().tick_duration().unwrap();
        assert!(duration > Duration::from_micros(4166) && duration < Duration::from_micros(4168));
        let duration = SceneConfig { tick_rate: 10_000.0 }.tick_duration().unwrap();
        assert!(!duration.is_zero());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = DemoConfig::load("does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn read_error_leaves_cause_to_source() {
        let err = DemoConfig::load("does/not/exist.yaml").unwrap_err();
        assert_eq!("Failed to read config does/not/exist.yaml", err.to_string());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn discover_prefers_env_file() {
        let path = std::env::temp_dir().join(format!("triangle_discover_{}.yaml", std::process::id()));
        std::fs::write(&path, "window:\n  title: FromEnv").unwrap();

        std::env::set_var(CONFIG_ENV, &path);
        let config = DemoConfig::discover();
        std::fs::remove_file(&path).unwrap();
        assert_eq!("FromEnv", config.unwrap().window.title);

        std::env::set_var(CONFIG_ENV, &path);
        let result = DemoConfig::discover();
        std::env::remove_var(CONFIG_ENV);
        match result {
            Err(ConfigError::Read { path: read_path, .. }) => assert_eq!(path, read_path),
            other => panic!("Unexpected result {other:?}"),
        }
    }
}
