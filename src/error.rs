//! Host setup errors
//!
//! The simulation itself never fails; everything here is about getting a
//! window, a canvas and a GPU surface. Any of these is fatal for the session.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global `window`")]
    NoWindow,

    #[error("no `document` on window")]
    NoDocument,

    #[error("missing DOM element `#{0}`")]
    MissingElement(&'static str),

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("surface reports no texture formats")]
    NoSurfaceFormat,

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_element() {
        let err = SetupError::MissingElement("canvas");
        assert_eq!(err.to_string(), "missing DOM element `#canvas`");

        let err = SetupError::Dom("TypeError".to_string());
        assert_eq!(err.to_string(), "DOM call failed: TypeError");
    }
}
