fn main() {
    path_checker::cli::run();
}
