//! Unit tests for the watchlist board: fetch, derive, sort, format.

#[cfg(test)]
mod stocks_tests {
    use crate::market::mock::MockMarket;
    use crate::market::Quote;
    use crate::services::stocks::*;
    use crate::watchlist::WatchlistEntry;

    fn entry(ticker: &str, number: i64, weight: f64) -> WatchlistEntry {
        WatchlistEntry {
            ticker: ticker.to_string(),
            number,
            weight,
        }
    }

    fn quote(symbol: &str, market_cap: Option<f64>) -> Quote {
        Quote {
            symbol: Some(symbol.to_string()),
            long_name: Some(format!("{} Corp", symbol)),
            current_price: Some(102.0),
            previous_close: Some(100.0),
            market_cap,
            ..Default::default()
        }
    }

    fn row(ticker: &str, market_cap: Option<f64>) -> StockRow {
        StockRow::new(entry(ticker, 0, 0.0), quote(ticker, market_cap))
    }

    fn tickers(rows: &[StockRow]) -> Vec<&str> {
        rows.iter().map(|r| r.entry.ticker.as_str()).collect()
    }

    // ============= SortOrder Tests =============

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("none")), SortOrder::None);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::None);
        assert_eq!(SortOrder::parse(None), SortOrder::None);
    }

    // ============= StockRow Tests =============

    #[test]
    fn test_row_derives_change_and_color() {
        let r = row("AAPL", None);
        assert_eq!(r.daily_change_percent, Some(2.0));
        // 2% of a 5% scale: 255 * 0.4 = 102
        assert_eq!(r.daily_change_color, "rgb(153, 255, 153)");
    }

    #[test]
    fn test_row_without_prices_is_white() {
        let r = StockRow::new(
            entry("X", 1, 1.0),
            Quote {
                current_price: Some(10.0),
                ..Default::default()
            },
        );
        assert_eq!(r.daily_change_percent, None);
        assert_eq!(r.daily_change_color, "#FFFFFF");
    }

    #[test]
    fn test_view_formats_magnitudes() {
        let q = Quote {
            symbol: Some("MSFT".to_string()),
            market_cap: Some(3_100_000_000_000.0),
            volume: Some(22_500_000.0),
            shares_outstanding: Some(7_430_000_000.0),
            ..Default::default()
        };
        let view = StockRow::new(entry("MSFT", 2, 0.3), q).into_view();

        assert_eq!(view.market_cap, "3.1000T");
        assert_eq!(view.volume, "22.50M");
        assert_eq!(view.shares_outstanding, "7.43B");
        assert_eq!(view.number, 2);
        assert_eq!(view.weight, 0.3);
    }

    #[test]
    fn test_view_fills_missing_text() {
        let view = StockRow::new(entry("X", 1, 1.0), Quote::default()).into_view();

        assert_eq!(view.symbol, "N/A");
        assert_eq!(view.long_name, "N/A");
        assert_eq!(view.sector, "N/A");
        assert_eq!(view.market_cap, "N/A");
        assert_eq!(view.current_price, None);
    }

    #[test]
    fn test_view_serialized_keys() {
        let view = row("AAPL", Some(950.0)).into_view();
        let json = serde_json::to_value(&view).unwrap();

        for key in [
            "symbol",
            "longName",
            "currentPrice",
            "previousClose",
            "marketCap",
            "volume",
            "sharesOutstanding",
            "dayHigh",
            "dayLow",
            "trailingPE",
            "dividendYield",
            "sector",
            "Number",
            "Weight",
            "dailyChangePercent",
            "dailyChangeColor",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["marketCap"], "950");
        assert_eq!(json["dailyChangePercent"], 2.0);
        assert!(json["dayHigh"].is_null());
    }

    // ============= Sorting Tests =============

    #[test]
    fn test_sort_market_cap_asc() {
        let mut rows = vec![
            row("A", Some(300.0)),
            row("B", Some(100.0)),
            row("C", Some(200.0)),
        ];
        sort_rows(&mut rows, "marketCap", SortOrder::Asc);
        assert_eq!(tickers(&rows), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_market_cap_desc() {
        let mut rows = vec![
            row("A", Some(300.0)),
            row("B", Some(100.0)),
            row("C", Some(200.0)),
        ];
        sort_rows(&mut rows, "marketCap", SortOrder::Desc);
        assert_eq!(tickers(&rows), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_sort_none_preserves_order() {
        let mut rows = vec![
            row("A", Some(300.0)),
            row("B", Some(100.0)),
            row("C", Some(200.0)),
        ];
        sort_rows(&mut rows, "marketCap", SortOrder::None);
        assert_eq!(tickers(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sort_empty_column_is_noop() {
        let mut rows = vec![row("A", Some(300.0)), row("B", Some(100.0))];
        sort_rows(&mut rows, "", SortOrder::Asc);
        assert_eq!(tickers(&rows), vec!["A", "B"]);
    }

    #[test]
    fn test_sort_unknown_column_is_noop() {
        let mut rows = vec![row("A", Some(300.0)), row("B", Some(100.0))];
        sort_rows(&mut rows, "doesNotExist", SortOrder::Desc);
        assert_eq!(tickers(&rows), vec!["A", "B"]);
    }

    #[test]
    fn test_sort_missing_values_as_zero() {
        let mut rows = vec![
            row("A", Some(50.0)),
            row("B", None),
            row("C", Some(-10.0)),
        ];
        sort_rows(&mut rows, "marketCap", SortOrder::Asc);
        assert_eq!(tickers(&rows), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let mut rows = vec![
            row("A", Some(1.0)),
            row("B", Some(2.0)),
            row("C", Some(1.0)),
            row("D", Some(2.0)),
        ];
        sort_rows(&mut rows, "marketCap", SortOrder::Desc);
        assert_eq!(tickers(&rows), vec!["B", "D", "A", "C"]);

        sort_rows(&mut rows, "marketCap", SortOrder::Asc);
        assert_eq!(tickers(&rows), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn test_sort_text_column() {
        let mut rows = vec![row("MSFT", None), row("AAPL", None), row("GOOG", None)];
        sort_rows(&mut rows, "symbol", SortOrder::Asc);
        assert_eq!(tickers(&rows), vec!["AAPL", "GOOG", "MSFT"]);
    }

    #[test]
    fn test_sort_watchlist_columns() {
        let mut rows = vec![
            StockRow::new(entry("A", 3, 0.1), quote("A", None)),
            StockRow::new(entry("B", 1, 0.5), quote("B", None)),
            StockRow::new(entry("C", 2, 0.3), quote("C", None)),
        ];
        sort_rows(&mut rows, "Number", SortOrder::Asc);
        assert_eq!(tickers(&rows), vec!["B", "C", "A"]);

        sort_rows(&mut rows, "Weight", SortOrder::Desc);
        assert_eq!(tickers(&rows), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_daily_change_with_missing() {
        let down = StockRow::new(
            entry("DOWN", 1, 0.0),
            Quote {
                current_price: Some(95.0),
                previous_close: Some(100.0),
                ..Default::default()
            },
        );
        let missing = StockRow::new(entry("NA", 2, 0.0), Quote::default());
        let up = row("UP", None);

        let mut rows = vec![up, missing, down];
        sort_rows(&mut rows, "dailyChangePercent", SortOrder::Asc);
        assert_eq!(tickers(&rows), vec!["DOWN", "NA", "UP"]);
    }

    // ============= Fetch Tests =============

    #[test]
    fn test_successful_rows_drop_failures() {
        let outcomes = vec![
            FetchOutcome {
                entry: entry("A", 1, 0.0),
                result: Ok(quote("A", None)),
            },
            FetchOutcome {
                entry: entry("B", 2, 0.0),
                result: Err(crate::error::ProviderError::SymbolNotFound {
                    symbol: "B".to_string(),
                }),
            },
        ];
        let rows = successful_rows(outcomes);
        assert_eq!(tickers(&rows), vec!["A"]);
    }

    #[tokio::test]
    async fn test_fetch_quotes_keeps_watchlist_order() {
        let market = MockMarket::default()
            .with_quote("A", quote("A", None))
            .with_quote("C", quote("C", None));
        let watchlist = vec![entry("A", 1, 0.0), entry("B", 2, 0.0), entry("C", 3, 0.0)];

        let outcomes = fetch_quotes(&market, &watchlist, 3).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].entry.ticker, "A");
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert_eq!(outcomes[2].entry.ticker, "C");
    }

    #[tokio::test]
    async fn test_build_board_partial_failure() {
        let market = MockMarket::default()
            .with_quote("AAPL", quote("AAPL", Some(300.0)))
            .with_quote("TSLA", quote("TSLA", Some(100.0)));
        let watchlist = vec![
            entry("AAPL", 1, 0.5),
            entry("BROKEN", 2, 0.2),
            entry("TSLA", 3, 0.3),
        ];

        let board = build_board(&market, &watchlist, 1, "", SortOrder::None).await;

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].symbol, "AAPL");
        assert_eq!(board[1].symbol, "TSLA");
        assert_eq!(board[1].number, 3);
    }

    #[tokio::test]
    async fn test_build_board_sorts_before_formatting() {
        // As strings "9.00M" > "10.00M"; numerically 9M < 10M
        let market = MockMarket::default()
            .with_quote("BIG", quote("BIG", Some(10_000_000.0)))
            .with_quote("SMALL", quote("SMALL", Some(9_000_000.0)));
        let watchlist = vec![entry("BIG", 1, 0.0), entry("SMALL", 2, 0.0)];

        let board = build_board(&market, &watchlist, 2, "marketCap", SortOrder::Asc).await;

        assert_eq!(board[0].symbol, "SMALL");
        assert_eq!(board[0].market_cap, "9.00M");
        assert_eq!(board[1].market_cap, "10.00M");
    }

    #[tokio::test]
    async fn test_build_board_empty_watchlist() {
        let market = MockMarket::default();
        let board = build_board(&market, &[], 4, "marketCap", SortOrder::Desc).await;
        assert!(board.is_empty());
    }
}
