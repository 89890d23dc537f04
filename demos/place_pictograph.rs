use miette::IntoDiagnostic;

const SAMPLE: &str = r#"{
    "letter": "A",
    "start_pos": "alpha1",
    "end_pos": "alpha3",
    "grid_mode": "diamond",
    "red_motion": {
        "id": 1, "motion_type": "pro", "start_loc": "n", "end_loc": "e",
        "start_ori": "in", "end_ori": "in", "prop_rot_dir": "cw", "turns": 0
    },
    "blue_motion": {
        "id": 2, "motion_type": "pro", "start_loc": "s", "end_loc": "w",
        "start_ori": "in", "end_ori": "in", "prop_rot_dir": "cw", "turns": 0
    }
}"#;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).into_diagnostic()?,
        None => SAMPLE.to_string(),
    };

    let pictograph = kinetic_placement::place_pictograph(&input)?;
    for arrow in [&pictograph.red_arrow, &pictograph.blue_arrow].into_iter().flatten() {
        println!(
            "{:>4} {:<6} at {:<2}  coords=({}, {})  rot={}  mirrored={}",
            arrow.color,
            arrow.motion_type,
            arrow.loc,
            arrow.coords.x,
            arrow.coords.y,
            arrow.rot_angle,
            arrow.svg_mirrored,
        );
    }
    println!("{}", serde_json::to_string_pretty(&pictograph).into_diagnostic()?);
    Ok(())
}
