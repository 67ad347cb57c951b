// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn plain() -> String {
    format!("{:?}", Styles::plain())
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    assert_ne!(format!("{:?}", styles()), plain());

    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn no_color_wins_over_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");

    assert!(!should_colorize());
    assert_eq!(format!("{:?}", styles()), plain());

    std::env::remove_var("NO_COLOR");
    std::env::remove_var("COLOR");
}
