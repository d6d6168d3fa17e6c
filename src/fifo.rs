//! FIFO-сопоставление продаж с лотами покупок.

use std::collections::{HashMap, VecDeque};

use chrono::NaiveDateTime;

use crate::error::TaxError;
use crate::types::{LotFragment, MatchedSale, Money, Trade, TradeSide};

/// Рабочая копия лота покупки; `seq` — позиция в исходном списке сделок.
#[derive(Debug)]
struct OpenLot {
    seq: usize,
    timestamp: NaiveDateTime,
    quantity: u32,
    unit_price: Money,
}

/// Сопоставляет каждую продажу с лотами покупок той же бумаги по FIFO.
///
/// Сделки должны быть заранее отсортированы по времени: покупки расходуются
/// в том порядке, в котором встречаются во входном списке. Исходные сделки
/// не изменяются, алгоритм работает с собственными копиями лотов.
///
/// Возвращает результаты продаж в порядке их следования во входе и
/// непроданные остатки лотов, тоже в исходном порядке. Если покупок
/// не хватает для покрытия продажи, расчёт прерывается ошибкой
/// `InsufficientLots` с тикером и непокрытым количеством.
pub fn match_sales(trades: &[Trade]) -> Result<(Vec<MatchedSale>, Vec<Trade>), TaxError> {
    let mut lots: HashMap<&str, VecDeque<OpenLot>> = HashMap::new();
    for (seq, trade) in trades.iter().enumerate() {
        if trade.side == TradeSide::Buy {
            lots.entry(trade.symbol.as_str())
                .or_default()
                .push_back(OpenLot {
                    seq,
                    timestamp: trade.timestamp,
                    quantity: trade.quantity,
                    unit_price: trade.unit_price,
                });
        }
    }

    let mut sales = Vec::new();
    for sale in trades.iter().filter(|t| t.side == TradeSide::Sell) {
        let mut sold_buyings = Vec::new();
        let mut remaining = sale.quantity;
        if let Some(queue) = lots.get_mut(sale.symbol.as_str()) {
            while remaining > 0 {
                let Some(lot) = queue.front_mut() else {
                    break;
                };
                let take = remaining.min(lot.quantity);
                sold_buyings.push(LotFragment {
                    acquired_at: lot.timestamp,
                    quantity: take,
                    unit_price: lot.unit_price,
                });
                lot.quantity -= take;
                remaining -= take;
                if lot.quantity == 0 {
                    queue.pop_front();
                }
            }
        }
        if remaining > 0 {
            return Err(TaxError::InsufficientLots {
                symbol: sale.symbol.clone(),
                shortfall: remaining,
            });
        }
        sales.push(MatchedSale {
            sale: sale.clone(),
            sold_buyings,
        });
    }

    // Восстанавливаем исходный порядок остатков по `seq`.
    let mut leftovers: Vec<(usize, Trade)> = Vec::new();
    for (symbol, queue) in &lots {
        for lot in queue {
            leftovers.push((
                lot.seq,
                Trade {
                    timestamp: lot.timestamp,
                    side: TradeSide::Buy,
                    symbol: (*symbol).to_string(),
                    quantity: lot.quantity,
                    unit_price: lot.unit_price,
                },
            ));
        }
    }
    leftovers.sort_by_key(|(seq, _)| *seq);
    let remaining_lots = leftovers.into_iter().map(|(_, trade)| trade).collect();

    Ok((sales, remaining_lots))
}
