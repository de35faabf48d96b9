// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Edit endpoints: upscale, restore-face, remove-bg, crop, resize, caption

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    caption_handler, crop_handler, remove_bg_handler, resize_handler, restore_face_handler,
    upscale_handler,
};
pub use request::{
    CaptionRequest, CropRequest, RemoveBgRequest, ResizeRequest, RestoreFaceRequest,
    UpscaleRequest,
};
pub use response::{CaptionResponse, EditResponse};
