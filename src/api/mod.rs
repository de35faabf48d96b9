// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod edit;
pub mod errors;
pub mod generate;
pub mod http_server;
pub mod rate_limiter;

pub use edit::{CaptionResponse, EditResponse};
pub use errors::{ApiError, ErrorResponse};
pub use generate::{GenerateImageRequest, GenerateResponse, GenerateVideoRequest};
pub use http_server::{build_router, start_server, AppState, HealthResponse};
pub use rate_limiter::SessionRateLimiter;
