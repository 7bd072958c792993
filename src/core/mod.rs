pub mod animation;
pub mod auto_quality;
pub mod config;
pub mod constants;
pub mod light;
pub mod morph;
pub mod projection;
pub mod quality;
pub mod ripple;
pub mod scene;
pub mod shader;
pub mod signup;
pub mod theme;
pub mod trail;

pub use auto_quality::{AutoQuality, AutoQualityConfig, FpsCounter};
pub use config::PageConfig;
pub use light::{LightDecay, PingPong, SplatInstance};
pub use projection::{CameraPose, Jacobian, LightSplat, SkyRect, SkySample};
pub use quality::{QualityProfile, QualityTier};
pub use scene::{FrameInput, FrameParams, PageKind, SceneState};
pub use theme::ThemeMode;

// Shaders bundled as string constants
pub static OCEAN_WGSL_TEMPLATE: &str = include_str!("../../shaders/ocean.wgsl");
pub static LIGHT_WGSL: &str = include_str!("../../shaders/light.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
