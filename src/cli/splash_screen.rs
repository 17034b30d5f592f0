//! The module contains functions for displaying the CLI splash screen:
//! - Title
//! - Short Description
//! - Version Information

use colored::*;

use crate::cli::colors::RELA_BLUE;

pub fn splash_screen() {
    show_splash_screen();
    show_version_info();
}

fn show_splash_screen() {
    print!(
        r#"
    {}
        "#,
        r"
    ██████╗ ███████╗██╗      █████╗ ██████╗ ██████╗
    ██╔══██╗██╔════╝██║     ██╔══██╗██╔══██╗██╔══██╗
    ██████╔╝█████╗  ██║     ███████║██║  ██║██████╔╝
    ██╔══██╗██╔══╝  ██║     ██╔══██║██║  ██║██╔══██╗
    ██║  ██║███████╗███████╗██║  ██║██████╔╝██████╔╝
    ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝  ╚═╝╚═════╝ ╚═════╝
        "
        .color(RELA_BLUE)
    )
}

fn show_version_info() {
    println!(
        r"
    {}

    Version {}
    Authored by {}
        ",
        env!("CARGO_PKG_DESCRIPTION").color(RELA_BLUE),
        env!("CARGO_PKG_VERSION").color(RELA_BLUE).italic(),
        env!("CARGO_PKG_AUTHORS").color(RELA_BLUE).italic(),
    )
}
