//! Prompt builders and reply parsers for the AI writing and image tools.
//! None of these compute anything themselves.

pub mod advisor;
pub mod copywriter;
pub mod imagery;
pub mod replies;

pub use advisor::advise_ads;
pub use copywriter::{generate_content, ContentType, GeneratedContent, ProductBrief, Tone};
pub use imagery::{render_product_image, ImageStyle};
pub use replies::{suggest_replies, write_video_script};
