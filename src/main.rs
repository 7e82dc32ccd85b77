fn main() {
    if let Err(err) = schedule_viewer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
