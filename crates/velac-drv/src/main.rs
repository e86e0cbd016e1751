fn main() {
    if let Err(err) = velac_drv::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
