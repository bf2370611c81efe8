fn main() {
    if let Err(e) = nutrient_rs::adapters::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
