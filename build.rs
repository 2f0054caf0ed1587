use std::env;
use std::path::PathBuf;

// ffmpeg-sys-next finds FFmpeg through pkg-config on Unix. Windows builds
// need FFMPEG_DIR; point at a vcpkg install when one is around.
fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows"
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Some(vcpkg_root) = env::var_os("VCPKG_ROOT") else {
        println!(
            "cargo:warning=smart_video_info needs FFmpeg; set FFMPEG_DIR to an FFmpeg install (or VCPKG_ROOT for a vcpkg one)."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let candidate = PathBuf::from(vcpkg_root).join("installed").join(triplet);
    if candidate.join("include").join("libavformat").exists() {
        println!(
            "cargo:warning=Found FFmpeg under {}; set FFMPEG_DIR to that path if linking fails.",
            candidate.display()
        );
    } else {
        println!(
            "cargo:warning=No FFmpeg headers under {}; install ffmpeg through vcpkg or set FFMPEG_DIR.",
            candidate.display()
        );
    }
}
