//! Ad-hoc risk scoring handler

use payroll_risk_core::{score_request, Prediction, ScoreRequest};

use crate::AppState;

pub fn predict(state: &AppState, request: &ScoreRequest) -> Prediction {
    let prediction = score_request(&state.model, request);
    tracing::debug!(?request, ?prediction, "Scored request");
    prediction
}
