fn main() -> anyhow::Result<()> {
    propdesc::cli::CommandLineInterface::load().run()
}
