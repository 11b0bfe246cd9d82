//! Status messages for operation feedback.

use std::fmt;

/// A one-line success or failure notice.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)
    }
}
