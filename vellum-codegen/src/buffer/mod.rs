//! Display buffer component
//!
//! A display buffer is an in-memory frame buffer with a fixed width, height
//! and pixel format, redrawn on a polling interval by a user callback or a
//! set of pages.

pub mod emit;
pub mod schema;

use serde::ser::Error as _;
use serde::Serialize;
use toml::value::Table;
use toml::Value;
use vellum_core::config::{ComponentConfig, PollingConfig};
use vellum_core::{Id, TimePeriod, UpdateInterval};
use vellum_display::{DisplayConfig, PixelFormat};

pub use emit::BufferEmitter;
pub use schema::BufferSchema;

/// Document key holding display buffer entries
pub const COMPONENT_KEY: &str = "display_buffer";

/// Runtime class every buffer instantiates
pub const BUFFER_CLASS: &str = "display_buffer::Buffer";

pub const CONF_WIDTH: &str = "width";
pub const CONF_HEIGHT: &str = "height";
pub const CONF_FORMAT: &str = "format";

pub const DEFAULT_WIDTH: u32 = 240;
pub const DEFAULT_HEIGHT: u32 = 240;

/// Buffers redraw every five seconds unless configured otherwise
pub const DEFAULT_UPDATE_INTERVAL: UpdateInterval =
    UpdateInterval::Every(TimePeriod::from_secs(5));

/// Validated, defaulted display buffer settings
///
/// Serializes back to the flat raw mapping it was validated from, with
/// defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferConfig {
    pub id: Id,
    pub width: u32,
    pub height: u32,
    /// `None` selects the runtime's default pixel format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<PixelFormat>,
    #[serde(flatten)]
    pub display: DisplayConfig,
    #[serde(flatten)]
    pub component: ComponentConfig,
    #[serde(flatten)]
    pub polling: PollingConfig,
}

impl BufferConfig {
    /// Serialize into a raw mapping
    pub fn to_raw(&self) -> Result<Table, toml::ser::Error> {
        match Value::try_from(self)? {
            Value::Table(table) => Ok(table),
            other => Err(toml::ser::Error::custom(format!(
                "expected a table, got {}",
                other.type_str()
            ))),
        }
    }

    /// Storage size of one frame in bytes
    ///
    /// Unknown without a format, since the runtime picks the default.
    pub fn frame_bytes(&self) -> Option<u64> {
        let format = self.format?;
        let bits = u64::from(self.width) * u64::from(self.height) * u64::from(format.bits_per_pixel());
        Some(bits.div_ceil(8))
    }

    /// One-line description of the buffer for build logs
    pub fn summary(&self) -> String {
        let size = format!("{}: {}x{}", self.id, self.width, self.height);
        let (Some(format), Some(bytes)) = (self.format, self.frame_bytes()) else {
            return format!("{}, default format", size);
        };
        let key = if format.details().color_key {
            ", color keyed"
        } else {
            ""
        };
        format!(
            "{}, {} ({}{}), {} bytes per frame",
            size,
            format,
            format.display_type(),
            key,
            bytes
        )
    }
}
