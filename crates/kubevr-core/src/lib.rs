//! KubeVR Core — domain layer for the pod visualization.
//!
//! Pod records and the wire protocol, the pod-list reconciler, the vive
//! cursor state machine, object filters, and the event channel seam.
//! No rendering or framework dependencies.

pub mod channel;
pub mod config;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod layout;
pub mod pod;
pub mod protocol;

// Re-exports for convenience.
pub use channel::{EventChannel, MemoryChannel};
pub use config::{CursorColor, PodLayoutConfig};
pub use cursor::{CursorEventKind, CursorMachine, Emission};
pub use error::{ChannelError, ColorError, FilterError, ProtocolError};
pub use filter::ObjectFilter;
pub use layout::{AddOutcome, PodLayout};
pub use pod::{Pod, PodRecord};
pub use protocol::{ClientEvent, ServerEvent};
