use std::env;

/// `cargo xtask bundle parametric_equalizer --release`
///
/// `--target <triple>` additionally gets its own target directory so cross builds don't
/// invalidate the host build.
fn main() -> nih_plug_xtask::Result<()> {
    let args = env::args().collect::<Vec<_>>();

    let target = args
        .iter()
        .position(|a| a == "--target")
        .and_then(|pos| args.get(pos + 1));
    if let Some(target) = target {
        env::set_var("CARGO_TARGET_DIR", format!("target/{target}"));
    }

    nih_plug_xtask::main()
}
