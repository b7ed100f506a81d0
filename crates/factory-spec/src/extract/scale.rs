//! Scale targets

use super::Extractors;
use crate::types::Scale;

impl Extractors {
    /// Baseline scale, raised for enterprise language, lowered for startup
    /// language; enterprise wins when both appear
    #[must_use]
    pub fn scale(&self, text: &str) -> Scale {
        if self.signal("enterprise", text) {
            self.defaults.enterprise_scale.clone()
        } else if self.signal("startup", text) {
            self.defaults.startup_scale.clone()
        } else {
            self.defaults.baseline_scale.clone()
        }
    }
}
