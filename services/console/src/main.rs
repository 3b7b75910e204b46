fn main() {
    if let Err(err) = drillops_console::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
