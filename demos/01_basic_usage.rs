use std::time::Duration;

use aletheia_rs::{
    AlClientBuilder, DatasetPortal, DatasetResolution, Dgii, DigitalGob, SearchPattern,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. One client for every provider. The API key is only needed by digital.gob.do.
    let mut builder = AlClientBuilder::default().timeout(Duration::from_secs(20));
    if let Ok(key) = std::env::var("DIGITAL_GOB_API_KEY") {
        builder = builder.api_key(key);
    }
    let client = builder.build()?;

    // 2. DGII over SOAP: the embedded JSON comes back already decoded.
    println!("--- DGII taxpayer lookup ---");
    let dgii = Dgii::new(&client);
    let taxpayer = dgii
        .contribuyentes("130102058", SearchPattern::Rnc, 1, 1, "")
        .await?;
    println!("{} -> {}", taxpayer.endpoint, serde_json::to_string_pretty(&taxpayer.payload)?);

    let count = dgii
        .contribuyentes_count("FARMACIA", SearchPattern::Name, "")
        .await?;
    println!("Taxpayers named like FARMACIA: {:?}", count.payload.as_json());
    println!();

    // 3. digital.gob.do REST gateway.
    if client.has_api_key() {
        println!("--- Fuel prices ---");
        let fuels = DigitalGob::new(&client)
            .fuel_prices("date", "2021-12-12")
            .await?;
        println!("{}", serde_json::to_string_pretty(&fuels.payload)?);
        println!();
    }

    // 4. Open-data portal: scrape, download and decode every CSV resource.
    println!("--- Dataset recaudaciones-sirite-2021-2022 ---");
    let portal = DatasetPortal::new(&client);
    for res in portal.resource_urls("recaudaciones-sirite-2021-2022").await? {
        println!("  [{}] {}", res.position, res.url);
    }
    match portal.resolve("recaudaciones-sirite-2021-2022").await? {
        DatasetResolution::Single(t) => {
            println!("One table with {} rows", t.table.len());
        }
        DatasetResolution::Many(tables) => {
            for t in &tables {
                println!("{}: {} rows, columns {:?}", t.resource_url, t.table.len(), t.table.headers);
            }
        }
    }

    Ok(())
}
