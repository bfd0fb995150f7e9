fn main() {
  if let Err(error) = ygo_binder::run() {
    eprintln!("ygo-binder: {}", error);
    std::process::exit(1);
  }
}
