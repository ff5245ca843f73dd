//! Joystick-driven OLED cursor and PWM LED firmware for the STM32F103 "Blue Pill".
//!
//! The library holds everything that does not touch a concrete peripheral:
//! board configuration, the debounce clock and toggle flag bank shared between
//! the button watcher and the main loop, joystick-to-cursor and
//! joystick-to-duty mapping, and frame rendering. Hardware wrappers live in
//! [`hardware`] and are generic over `embedded-hal` traits, so everything except
//! the binary can be tested on the host:
//!
//! ```text
//! cargo test --target x86_64-unknown-linux-gnu
//! ```

#![no_std]

// Use std when running tests on the host
#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
mod fmt;

pub mod actuation;
pub mod buttons;
pub mod config;
pub mod debounce;
pub mod error;
pub mod hardware;
pub mod joystick;
pub mod render;
pub mod toggles;
