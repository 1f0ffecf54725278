#![cfg(feature = "cli")]

mod common;

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use common::{noise_pattern, temp_path};

fn run<P: AsRef<OsStr>>(args: &[P]) -> (i32, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_imgconv"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("spawn imgconv");
    let code = output.status.code().expect("exit code");
    (code, String::from_utf8_lossy(&output.stdout).into_owned())
}

#[test]
fn converts_ppm_to_bmp() {
    let image = noise_pattern(7, 3, 5);
    let src = temp_path("cli-src.ppm");
    let dst = temp_path("cli-dst.bmp");
    imgconv::save(&src, &image).unwrap();

    let (code, stdout) = run(&[&src, &dst]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Successfully converted"));
    assert_eq!(imgconv::load(&dst).unwrap(), image);
}

#[test]
fn wrong_argument_count_exits_1() {
    let only = temp_path("only.bmp");
    assert_eq!(run::<&str>(&[]).0, 1);
    assert_eq!(run(&[&only]).0, 1);
    assert_eq!(run(&[&only, &only, &only]).0, 1);
}

#[test]
fn unknown_input_extension_exits_2() {
    let (code, _) = run(&[Path::new("in.gif"), Path::new("out.bmp")]);
    assert_eq!(code, 2);
}

#[test]
fn unknown_output_extension_exits_3() {
    let (code, _) = run(&[Path::new("in.bmp"), Path::new("out.gif")]);
    assert_eq!(code, 3);
}

#[test]
fn load_failure_exits_4() {
    let src = temp_path("garbage.bmp");
    std::fs::write(&src, b"not a bitmap at all").unwrap();
    let (code, _) = run(&[&src, &temp_path("never.ppm")]);
    assert_eq!(code, 4);
}

#[test]
fn save_failure_exits_5() {
    let src = temp_path("ok.bmp");
    imgconv::save(&src, &noise_pattern(2, 2, 1)).unwrap();
    let dst = temp_path("missing-dir").join("out.ppm");
    let (code, _) = run(&[&src, &dst]);
    assert_eq!(code, 5);
}
