//! Build script for detecting system dependencies and providing installation guidance.
//!
//! This script checks for the X11 libraries and XTEST extension used for
//! pointer control and provides helpful messages if they are missing.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    check_pkg_config();
    check_x11();

    // Print detected environment
    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
    println!("cargo:rustc-env=BUILD_HOST={}", env::var("HOST").unwrap_or_default());
}

fn check_x11() {
    // Only check on Linux
    if env::var("TARGET").unwrap_or_default().contains("linux") {
        let output = Command::new("pkg-config").args(["--exists", "x11"]).output();

        match output {
            Ok(output) if output.status.success() => {
                println!("cargo:warning=Found X11 libraries");
            }
            _ => {
                println!("cargo:warning=X11 libraries not found. Pointer control will not work.");
                println!("cargo:warning=On Ubuntu: sudo apt-get install libx11-dev");
            }
        }

        let output = Command::new("pkg-config").args(["--exists", "xtst"]).output();

        match output {
            Ok(output) if output.status.success() => {
                println!("cargo:warning=Found XTEST extension libraries");
            }
            _ => {
                println!("cargo:warning=XTEST libraries not found. Button injection will not work.");
                println!("cargo:warning=On Ubuntu: sudo apt-get install libxtst-dev");
            }
        }
    }
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found pkg-config version: {}", version.trim());
        }
        _ => {
            println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        }
    }
}
