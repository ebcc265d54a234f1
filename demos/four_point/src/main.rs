use argh::FromArgs;
use perspective_transform::{compute_homography_with_params, Corners, HomographyParams};

/// Computes the perspective transform between two quadrilaterals
#[derive(Debug, FromArgs)]
struct Args {
    /// source corners as "x,y x,y x,y x,y" in tl, tr, br, bl order
    #[argh(option, short = 's', from_str_fn(parse_corners))]
    src: Corners,

    /// destination corners as "x,y x,y x,y x,y" in tl, tr, br, bl order
    #[argh(option, short = 'd', from_str_fn(parse_corners))]
    dst: Corners,

    /// normalize the corners before solving
    #[argh(switch, short = 'n')]
    normalize: bool,

    /// print the matrix as json
    #[argh(switch, short = 'j')]
    json: bool,
}

fn parse_corners(value: &str) -> Result<Corners, String> {
    let points = value
        .split_whitespace()
        .map(|pair| -> Result<[f64; 2], String> {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| format!("expected x,y but got '{pair}'"))?;
            let x = x.trim().parse::<f64>().map_err(|e| format!("{x}: {e}"))?;
            let y = y.trim().parse::<f64>().map_err(|e| format!("{y}: {e}"))?;
            Ok([x, y])
        })
        .collect::<Result<Vec<_>, String>>()?;

    let points: [[f64; 2]; 4] = points
        .try_into()
        .map_err(|p: Vec<_>| format!("expected 4 corners, got {}", p.len()))?;

    Ok(Corners::from_array(points))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let params = HomographyParams {
        normalize: args.normalize,
        ..Default::default()
    };

    let homo = compute_homography_with_params(Some(&args.src), Some(&args.dst), &params);

    if homo.is_identity() && args.src != args.dst {
        log::info!("the corners could not be mapped, run with RUST_LOG=debug for details");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&homo)?);
    } else {
        for row in homo.to_rows() {
            println!("{:>14.6} {:>14.6} {:>14.6}", row[0], row[1], row[2]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corners() -> Result<(), String> {
        let c = parse_corners("0,0 1,0 1.5,1 -0.5,1")?;
        assert_eq!(c.to_array(), [[0.0, 0.0], [1.0, 0.0], [1.5, 1.0], [-0.5, 1.0]]);
        Ok(())
    }

    #[test]
    fn test_parse_corners_errors() {
        assert!(parse_corners("0,0 1,0 1,1").is_err());
        assert!(parse_corners("0,0 1,0 1,1 0;1").is_err());
        assert!(parse_corners("0,0 1,0 1,1 a,1").is_err());
    }
}
