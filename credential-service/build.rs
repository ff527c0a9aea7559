fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate gRPC server code from proto files
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .compile(&["../proto/credential.proto"], &["../proto"])?;

    Ok(())
}
