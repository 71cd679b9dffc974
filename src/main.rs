fn main() {
    if let Err(err) = spatial_summary_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
