use serde::Serialize;

// -------------------------
// Response DTOs
// -------------------------

/// `POST /api/work` and `POST /api/relax`.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub ok: bool,
    pub balance: i64,
}

/// `GET /api/target`.
#[derive(Debug, Serialize)]
pub struct TargetResponse {
    pub target: i64,
}

/// `POST /api/target`.
#[derive(Debug, Serialize)]
pub struct TargetUpdatedResponse {
    pub ok: bool,
    pub target: i64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
