use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=ARTIFACT_TOOLCHAIN_HINT");

    if let Ok(hint) = env::var("ARTIFACT_TOOLCHAIN_HINT") {
        let hint = hint.trim();
        if !hint.is_empty() {
            println!("cargo:rustc-env=ARTIFACT_TOOLCHAIN_HINT={hint}");
        }
    }
}
