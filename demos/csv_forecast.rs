use anyhow::Result;
use chrono::{TimeDelta, Utc};
use meteomatics::{
    Client, Interval, Level, LocationSpec, Parameter, ParameterSpec, Postal, TimeSpec, Units, names,
};

fn main() -> Result<()> {
    env_logger::init();

    // Configure credentials via env vars or a `.meteomaticsrc` file.
    let client = Client::from_env()?;

    let time = TimeSpec::period(Utc::now(), TimeDelta::days(1), TimeDelta::hours(3));
    let parameter = ParameterSpec::from(vec![
        Parameter::new(names::TEMPERATURE, Units::Celsius).level(Level::Meters(2)),
        Parameter::new(names::PRECIPITATION, Units::Millimeters).interval(Interval::H_3),
    ]);
    let location: LocationSpec = Postal::new("CH", "9000").into();

    let cr = client.csv_request(&time, &parameter, &location, None)?;
    println!("{}", cr.parameters.join("\t"));
    for row in &cr.rows {
        println!("{}\t{:?}", row.valid_date, row.values);
    }
    Ok(())
}
