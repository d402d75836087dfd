fn main() -> anyhow::Result<()> {
    tessera_demos::launch(tessera_demos::scenes::wireframe_quad()?)
}
