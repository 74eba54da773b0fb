use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

pub const SCREEN_WIDTH: u32 = 960;
pub const SCREEN_HEIGHT: u32 = 640;

const MIN_SIZE: f64 = 64.0;

/// Opens the simulator window.
///
/// Returns the window, its physical width and height, and the scale factor
/// the physical size was derived from.
pub fn create_window(
    title: &str,
    event_loop: &EventLoop<()>,
) -> Result<(Window, u32, u32, f64), OsError> {
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
        .with_min_inner_size(LogicalSize::new(MIN_SIZE, MIN_SIZE))
        .build(event_loop)?;

    let hidpi_factor = window.scale_factor();
    let size = window.inner_size();

    Ok((window, size.width, size.height, hidpi_factor))
}
