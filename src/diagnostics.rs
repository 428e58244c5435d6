//! Photo diagnostics
//!
//! The capture button cycles Ready -> Captured -> Diagnosed -> Ready.
//! Diagnosis is mocked: every photo is diagnosed as under-watered.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureState {
    #[default]
    Ready,
    Captured,
    Diagnosed,
}

impl CaptureState {
    /// State after pressing the capture button
    pub fn advance(self) -> Self {
        match self {
            CaptureState::Ready => CaptureState::Captured,
            CaptureState::Captured => CaptureState::Diagnosed,
            CaptureState::Diagnosed => CaptureState::Ready,
        }
    }

    pub fn reset(self) -> Self {
        CaptureState::Ready
    }

    /// Status caption under the camera button
    pub fn caption(self) -> &'static str {
        match self {
            CaptureState::Ready => "Ready",
            CaptureState::Captured => "Review",
            CaptureState::Diagnosed => "Diagnosed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub plant: String,
    pub condition: String,
    pub summary: String,
}

pub fn diagnose(plant_name: &str) -> Diagnosis {
    let plant = plant_name.trim();
    let subject = if plant.is_empty() {
        "plant".to_string()
    } else {
        format!("{} plant", plant.to_lowercase())
    };

    Diagnosis {
        plant: plant.to_string(),
        condition: "Needs Water".to_string(),
        summary: format!(
            "Your {} is showing signs of dehydration. The leaves are starting to wilt.",
            subject
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_cycle() {
        let state = CaptureState::default();
        assert_eq!(state, CaptureState::Ready);
        let state = state.advance();
        assert_eq!(state.caption(), "Review");
        let state = state.advance();
        assert_eq!(state, CaptureState::Diagnosed);
        assert_eq!(state.advance(), CaptureState::Ready);
        assert_eq!(CaptureState::Captured.reset(), CaptureState::Ready);
    }

    #[test]
    fn test_diagnosis_text() {
        let diagnosis = diagnose("Basil");
        assert_eq!(diagnosis.condition, "Needs Water");
        assert_eq!(
            diagnosis.summary,
            "Your basil plant is showing signs of dehydration. The leaves are starting to wilt."
        );
        assert!(diagnose("").summary.starts_with("Your plant is"));
    }
}
