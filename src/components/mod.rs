pub mod app;
pub mod camera_view;
pub mod controls_panel;
pub mod message_banner;
pub mod particle_overlay;
