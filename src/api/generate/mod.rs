// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation endpoints: txt2img, img2img, inpaint, controlnet, t2v, animate, stylize

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{
    animate_handler, controlnet_handler, img2img_handler, inpaint_handler, stylize_handler,
    t2v_handler, txt2img_handler,
};
pub use request::{
    ControlnetParams, GenerateImageRequest, GenerateVideoRequest, DEFAULT_DURATION_SEC,
    DEFAULT_FPS, DEFAULT_GUIDANCE, DEFAULT_MODE, DEFAULT_STEPS,
};
pub use response::GenerateResponse;
