use pluscodes_rs::{PlusCode, PlusCodeError, Point, ShortCode};

fn main() -> Result<(), PlusCodeError> {
    let lon = -2.2479699500757597;
    let lat = 53.48082746395233;

    let code = PlusCode::from_wgs84(&(lon, lat), 11)?;

    println!("Plus code: {}", code);
    println!("Center: ({}, {})", code.center().lat, code.center().lon);
    println!("Bounds: {:?} -> {:?}", code.area.sw(), code.area.ne());

    let reference = Point::new(53.48, -2.24);
    let short = ShortCode::parse(&code.shorten(&reference)?)?;
    println!("Short code near {:?}: {}", reference.lat_lon(), short);
    println!("Recovered: {}", short.recover(&reference)?);

    let polygon = code.to_polygon();
    println!("Polygon: {:?}", polygon);

    Ok(())
}
