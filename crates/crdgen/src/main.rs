use mariadb::api::v1alpha1;
use mariadb::scheme::Scheme;
use mariadb::util::telemetry;
use tracing::info;

fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    let mut scheme = Scheme::new();
    v1alpha1::add_to_scheme(&mut scheme)?;
    info!("generating {} custom resource definitions", scheme.len());

    print!("{}", scheme.to_yaml()?);
    Ok(())
}
