fn main() -> anyhow::Result<()> {
    nimbus_ui_terminal::run()
}
