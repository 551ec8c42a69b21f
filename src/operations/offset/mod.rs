mod thicken_path;

pub use thicken_path::ThickenPath;
