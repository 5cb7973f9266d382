#[cfg(feature = "configs")]
pub mod configuration {
    use config::Config;
    use serde::Deserialize;

    use crate::framer::DEFAULT_MAX_BUFFER;
    use crate::session::DEFAULT_BAUD_RATE;

    /// Transport and pipeline settings.
    #[derive(Debug, Deserialize)]
    #[serde(default)]
    pub struct LinkConfig {
        pub baud_rate: u32,
        pub read_chunk_size: usize,
        pub max_buffer_size: usize,
        pub skip_invalid: bool,
    }

    impl Default for LinkConfig {
        fn default() -> Self {
            Self {
                baud_rate: DEFAULT_BAUD_RATE,
                read_chunk_size: 1024,
                max_buffer_size: DEFAULT_MAX_BUFFER,
                skip_invalid: true,
            }
        }
    }

    /// Drawing-surface settings.
    #[derive(Debug, Deserialize)]
    #[serde(default)]
    pub struct SurfaceSettings {
        pub width: f64,
        pub height: f64,
        pub margin: f64,
        pub scale: f64,
    }

    impl Default for SurfaceSettings {
        fn default() -> Self {
            let surface = crate::view::Surface::default();
            Self {
                width: surface.width,
                height: surface.height,
                margin: surface.margin,
                scale: surface.scale,
            }
        }
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct ViewerConfig {
        pub link: LinkConfig,
        pub surface: SurfaceSettings,
    }

    impl ViewerConfig {
        pub fn parser_config(&self) -> crate::parser::ParserConfig {
            crate::parser::ParserConfig {
                read_chunk_size: self.link.read_chunk_size,
                max_buffer_size: self.link.max_buffer_size,
                skip_invalid: self.link.skip_invalid,
            }
        }

        pub fn view_surface(&self) -> crate::view::Surface {
            crate::view::Surface {
                width: self.surface.width,
                height: self.surface.height,
                margin: self.surface.margin,
                scale: self.surface.scale,
            }
        }
    }

    pub fn load_config(path: &str) -> Result<ViewerConfig, config::ConfigError> {
        let settings = Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        settings.try_deserialize()
    }
}
