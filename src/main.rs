fn main() {
    if let Err(e) = exam_guard_lib::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
