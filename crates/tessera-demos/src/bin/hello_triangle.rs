fn main() -> anyhow::Result<()> {
    tessera_demos::launch(tessera_demos::scenes::hello_triangle()?)
}
