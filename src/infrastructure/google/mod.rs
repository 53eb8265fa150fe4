//! Google identity provider adapter.

mod device_flow;
mod dto;

pub use device_flow::GoogleDeviceAuthorizer;
