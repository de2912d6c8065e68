mod viewport;
mod window;

pub use viewport::ViewportState;
pub use window::WindowState;
