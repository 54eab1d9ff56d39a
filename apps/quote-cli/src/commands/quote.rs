//! Quote command implementation.
//!
//! Builds a [`QuoteRequest`] from flags or a saved JSON request and prints
//! the resulting breakdown.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use tracing::info;

use frameshop_config::ConfigLoader;
use frameshop_core::{
    AreaUnit, FramePricingMethod, FrameRecord, Geometry, GlassRecord, MatRecord,
    PricingEngine, ProfitabilityAccess, QuoteRequest,
};

use crate::cli::OutputFormat;
use crate::output;

/// Arguments for the quote command.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Saved quote request (JSON, camelCase fields)
    #[arg(long, conflicts_with_all = [
        "width", "height", "mat_width", "frame", "mat", "glass", "method", "quantity", "no_backing",
    ])]
    pub request: Option<PathBuf>,

    /// Artwork width in inches
    #[arg(long, required_unless_present = "request")]
    pub width: Option<Decimal>,

    /// Artwork height in inches
    #[arg(long, required_unless_present = "request")]
    pub height: Option<Decimal>,

    /// Mat border on each side in inches
    #[arg(long)]
    pub mat_width: Option<Decimal>,

    /// Moulding id
    #[arg(long)]
    pub frame: Option<String>,

    /// Moulding wholesale price per foot. Omit to use the configured default.
    #[arg(long, requires = "frame")]
    pub frame_price: Option<Decimal>,

    /// How the moulding is bought
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Mat board id
    #[arg(long)]
    pub mat: Option<String>,

    /// Mat board wholesale price. Omit to use the configured default.
    #[arg(long, requires = "mat")]
    pub mat_price: Option<Decimal>,

    /// Unit the mat price is quoted in
    #[arg(long, value_enum, default_value = "sq-ft")]
    pub mat_unit: MatUnitArg,

    /// Glazing product name (the glass type is read from it)
    #[arg(long)]
    pub glass: Option<String>,

    /// Glazing wholesale price per square inch. Omit to use the configured default.
    #[arg(long, requires = "glass")]
    pub glass_price: Option<Decimal>,

    /// Number of identical pieces
    #[arg(long)]
    pub quantity: Option<i64>,

    /// Leave backing board off the order
    #[arg(long)]
    pub no_backing: bool,

    /// Include wholesale cost and profitability
    #[arg(long)]
    pub show_costs: bool,
}

/// Moulding purchase method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Chop,
    Length,
    Join,
}

impl From<MethodArg> for FramePricingMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Chop => FramePricingMethod::Chop,
            MethodArg::Length => FramePricingMethod::Length,
            MethodArg::Join => FramePricingMethod::Join,
        }
    }
}

/// Mat price unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatUnitArg {
    SqFt,
    SqIn,
}

impl From<MatUnitArg> for AreaUnit {
    fn from(arg: MatUnitArg) -> Self {
        match arg {
            MatUnitArg::SqFt => AreaUnit::PerSquareFoot,
            MatUnitArg::SqIn => AreaUnit::PerSquareInch,
        }
    }
}

impl QuoteArgs {
    /// Builds the request the engine prices.
    pub fn to_request(&self) -> Result<QuoteRequest> {
        if let Some(path) = &self.request {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading quote request {}", path.display()))?;
            return serde_json::from_str(&contents)
                .with_context(|| format!("parsing quote request {}", path.display()));
        }

        let width = self.width.ok_or_else(|| anyhow!("--width is required"))?;
        let height = self.height.ok_or_else(|| anyhow!("--height is required"))?;
        let geometry = Geometry::new(width, height, self.mat_width.unwrap_or(Decimal::ZERO));

        let mut request = QuoteRequest::new(geometry);

        if let Some(id) = &self.frame {
            request = request.with_frame(match self.frame_price {
                Some(price) => FrameRecord::priced(id.clone(), price),
                None => FrameRecord::unpriced(id.clone()),
            });
        }
        if let Some(method) = self.method {
            request = request.with_method(method.into());
        }
        if let Some(id) = &self.mat {
            request = request.with_mat(MatRecord::new(
                id.clone(),
                self.mat_price,
                self.mat_unit.into(),
            ));
        }
        if let Some(name) = &self.glass {
            request = request.with_glass(GlassRecord::new(name.clone(), name.clone(), self.glass_price));
        }
        if let Some(quantity) = self.quantity {
            request = request.with_quantity(quantity);
        }
        if self.no_backing {
            request = request.without_backing();
        }

        Ok(request)
    }

    fn access(&self) -> ProfitabilityAccess {
        if self.show_costs {
            ProfitabilityAccess::Authorized
        } else {
            ProfitabilityAccess::Withheld
        }
    }
}

/// Execute the quote command.
pub fn execute(args: QuoteArgs, format: OutputFormat, config_path: Option<PathBuf>) -> Result<()> {
    let config = ConfigLoader::from_option(config_path)
        .load()
        .context("loading pricing config")?;
    let engine = PricingEngine::new(config)?;

    let request = args.to_request()?;
    let breakdown = engine.quote(&request, args.access())?;

    info!(
        grand_total = %breakdown.grand_total,
        quantity = breakdown.quantity,
        defaulted = breakdown.used_default_wholesale_price,
        "Quote priced"
    );

    output::print_breakdown(&breakdown, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use frameshop_core::GlassType;
    use rust_decimal_macros::dec;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: QuoteArgs,
    }

    fn parse(argv: &[&str]) -> QuoteArgs {
        let mut full = vec!["frameshop-quote"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_flags_build_request() {
        let args = parse(&[
            "--width", "16", "--height", "20", "--mat-width", "2",
            "--frame", "M-1024", "--frame-price", "3.75", "--method", "join",
            "--mat", "WHITE", "--mat-price", "0.03", "--mat-unit", "sq-in",
            "--glass", "Museum Glass", "--quantity", "3", "--no-backing",
        ]);
        let request = args.to_request().unwrap();

        assert_eq!(request.geometry, Geometry::new(dec!(16), dec!(20), dec!(2)));
        assert_eq!(request.frame, Some(FrameRecord::priced("M-1024", dec!(3.75))));
        assert_eq!(request.frame_method, FramePricingMethod::Join);

        let mat = request.mat.unwrap();
        assert_eq!(mat.price, Some(dec!(0.03)));
        assert_eq!(mat.price_unit, AreaUnit::PerSquareInch);

        let glass = request.glass.unwrap();
        assert_eq!(glass.price, None);
        assert_eq!(glass.glass_type(), GlassType::Museum);

        assert_eq!(request.quantity, 3);
        assert!(!request.include_backing);
    }

    #[test]
    fn test_minimal_flags_use_request_defaults() {
        let request = parse(&["--width", "8", "--height", "10"]).to_request().unwrap();

        assert_eq!(request.geometry.mat_width, Decimal::ZERO);
        assert!(request.frame.is_none() && request.mat.is_none() && request.glass.is_none());
        assert_eq!(request.quantity, 1);
        assert!(request.include_backing);
    }

    #[test]
    fn test_dimensions_required_without_request_file() {
        let err = Harness::try_parse_from(["frameshop-quote", "--width", "8"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_price_without_item_is_rejected() {
        let err = Harness::try_parse_from([
            "frameshop-quote", "--width", "8", "--height", "10", "--mat-price", "4",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.json");
        std::fs::write(
            &path,
            r#"{
                "geometry": { "artworkWidth": "20", "artworkHeight": "16", "matWidth": "4" },
                "mat": { "id": "MAT-1", "price": "4.00" },
                "quantity": 2
            }"#,
        )
        .unwrap();

        let args = parse(&["--request", path.to_str().unwrap()]);
        let request = args.to_request().unwrap();

        assert_eq!(request.geometry.artwork_width, dec!(20));
        assert_eq!(request.mat.unwrap().price, Some(dec!(4.00)));
        assert_eq!(request.quantity, 2);
        assert!(request.include_backing);
    }

    #[test]
    fn test_request_file_conflicts_with_dimensions() {
        let err = Harness::try_parse_from([
            "frameshop-quote", "--request", "order.json", "--width", "8",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_show_costs_authorizes_profitability() {
        let args = parse(&["--width", "8", "--height", "10", "--show-costs"]);
        assert_eq!(args.access(), ProfitabilityAccess::Authorized);

        let request = args.to_request().unwrap();
        let breakdown = PricingEngine::with_defaults().quote(&request, args.access()).unwrap();
        assert!(breakdown.has_cost_data());
    }
}
