//! # 투자 실행
//!
//! 한 번의 투자는 다섯 개의 쓰기로 이루어지며 모두 같은 트랜잭션에서 수행됩니다.
//!
//! ```text
//! begin_transaction
//!   ├─ investments          insert
//!   ├─ founders             $inc total_invested
//!   ├─ investors            $push investment_portfolio, $inc total_invested
//!   ├─ deals                $inc fund_required (-amount)
//!   └─ activities           insert
//! commit (실패 시 abort, 아무것도 반영되지 않음)
//! ```
//!
//! 남은 모집 금액이 음수가 되는 것은 막지 않습니다. 초과 청약을 뜻합니다.

use std::sync::Arc;

use log::{error, info};
use mongodb::{bson::oid::ObjectId, ClientSession};
use singleton_macro::service;

use crate::{
    core::errors::AppError,
    db::Database,
    domain::{
        dto::deals::InvestmentResponse,
        entities::{
            deals::{Deal, Investment},
            matching::Activity,
            profiles::PortfolioEntry,
        },
    },
    repositories::{
        deals::{DealRepository, InvestmentRepository},
        matching::ActivityRepository,
        profiles::{FounderRepository, InvestorRepository},
    },
};

#[service(name = "investment")]
pub struct InvestmentService {
    db: Arc<Database>,
    deal_repo: Arc<DealRepository>,
    investment_repo: Arc<InvestmentRepository>,
    founder_repo: Arc<FounderRepository>,
    investor_repo: Arc<InvestorRepository>,
    activity_repo: Arc<ActivityRepository>,
}

fn portfolio_entry(investment: &Investment) -> PortfolioEntry {
    PortfolioEntry {
        startup_id: investment.founder_id,
        amount: investment.amount,
        current_value: None,
        deal_id: Some(investment.deal_id),
        invested_at: Some(investment.investment_date),
    }
}

impl InvestmentService {
    pub async fn invest(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        amount: f64,
    ) -> Result<InvestmentResponse, AppError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::ValidationError("투자 금액은 0보다 커야 합니다".to_string()));
        }

        let deal = self.deal_repo
            .find_owned(deal_id, investor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("딜을 찾을 수 없습니다".to_string()))?;

        let investment = Investment::new(*deal_id, *investor_id, deal.startup_id, amount);

        let mut session = self.db.begin_transaction().await?;

        let updated = match self.apply(&investment, &mut session).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Err(abort_error) = session.abort_transaction().await {
                    error!("투자 트랜잭션 중단 실패: {}", abort_error);
                }
                return Err(e);
            }
        };

        session.commit_transaction().await?;

        self.founder_repo.evict(&deal.startup_id).await;
        self.investor_repo.evict(investor_id).await;

        info!(
            "투자 완료: 투자자 {} → 스타트업 {} ({:.2}, 남은 모집 금액 {:.2})",
            investor_id, deal.startup_id, amount, updated.fund_required
        );

        Ok(InvestmentResponse::new(investment, updated.fund_required))
    }

    async fn apply(&self, investment: &Investment, session: &mut ClientSession) -> Result<Deal, AppError> {
        self.investment_repo.insert(investment, session).await?;

        self.founder_repo
            .increment_total_invested(&investment.founder_id, investment.amount, session)
            .await?;

        self.investor_repo
            .record_investment(&investment.investor_id, &portfolio_entry(investment), session)
            .await?;

        let updated = self.deal_repo
            .decrement_fund_required(&investment.deal_id, &investment.investor_id, investment.amount, session)
            .await?;

        self.activity_repo
            .insert_in(&Activity::invested(investment.investor_id, investment.amount), session)
            .await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_entry_links_deal_and_founder() {
        let deal_id = ObjectId::new();
        let founder_id = ObjectId::new();
        let investment = Investment::new(deal_id, ObjectId::new(), founder_id, 25000.0);

        let entry = portfolio_entry(&investment);
        assert_eq!(entry.startup_id, founder_id);
        assert_eq!(entry.deal_id, Some(deal_id));
        assert_eq!(entry.amount, 25000.0);
        assert!(entry.current_value.is_none());
        assert_eq!(entry.invested_at, Some(investment.investment_date));
    }
}
