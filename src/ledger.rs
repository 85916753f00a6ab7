use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::agent::Agent;
use crate::calendar::{BusinessCalendar, PublicHoliday};
use crate::config::{LoanSettings, QualificationRange};
use crate::customer::Customer;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::scoring;
use crate::transfer::{TransferAction, TransferRequest};
use crate::types::{AgentId, CustomerId, LoanId, LoanStatus, RepaymentId, TransferId};

/// one day's collection against a loan, attributed to the recording agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repayment {
    pub id: RepaymentId,
    pub loan_id: LoanId,
    pub recorded_by: AgentId,
    pub date: NaiveDate,
    pub amount_paid: Money,
}

/// an agent's collection figures for the current day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub active_loans: usize,
    pub due_today: usize,
    pub amount_to_collect: Money,
    pub amount_collected: Money,
    pub loans_collected: usize,
    /// share of active loans collected today, percent to 2 places
    pub loan_collection_rate: Decimal,
    /// share of the expected daily amount collected, percent to 2 places
    pub amount_collection_rate: Decimal,
    pub amount_in_hand: Money,
}

/// the origination and collection ledger
///
/// every mutating operation validates completely before touching state, so a
/// failed call leaves no partial mutation behind; the repayment log is keyed
/// by its natural key `(loan, date)`, which closes the check-then-insert race
/// at the storage layer
pub struct Ledger {
    settings: LoanSettings,
    agents: HashMap<AgentId, Agent>,
    customers: HashMap<CustomerId, Customer>,
    loans: HashMap<LoanId, Loan>,
    repayments: BTreeMap<(LoanId, NaiveDate), Repayment>,
    transfers: HashMap<TransferId, TransferRequest>,
    holidays: Vec<PublicHoliday>,
    pub events: EventStore,
}

impl Ledger {
    pub fn new(settings: LoanSettings) -> Self {
        Self {
            settings,
            agents: HashMap::new(),
            customers: HashMap::new(),
            loans: HashMap::new(),
            repayments: BTreeMap::new(),
            transfers: HashMap::new(),
            holidays: Vec::new(),
            events: EventStore::new(),
        }
    }

    pub fn settings(&self) -> &LoanSettings {
        &self.settings
    }

    // --- registration -----------------------------------------------------

    pub fn register_agent(&mut self, name: impl Into<String>, phone: impl Into<String>) -> AgentId {
        let agent = Agent::new(name, phone);
        let agent_id = agent.id;
        self.agents.insert(agent_id, agent);
        self.events.emit(Event::AgentRegistered { agent_id });
        agent_id
    }

    pub fn register_customer(
        &mut self,
        agent_id: AgentId,
        name: impl Into<String>,
        phone: impl Into<String>,
        national_id: impl Into<String>,
        time: &SafeTimeProvider,
    ) -> Result<CustomerId> {
        if !self.agents.contains_key(&agent_id) {
            return Err(LedgerError::UnknownAgent { id: agent_id });
        }

        let customer = Customer::new(agent_id, name, phone, national_id, time.now().date_naive());
        let customer_id = customer.id;
        self.customers.insert(customer_id, customer);
        self.events.emit(Event::CustomerRegistered {
            customer_id,
            agent_id,
        });
        Ok(customer_id)
    }

    // --- calendar ---------------------------------------------------------

    pub fn add_holiday(&mut self, holiday: PublicHoliday) {
        self.holidays.push(holiday);
    }

    /// snapshot of the current holiday list; schedules computed against an
    /// earlier snapshot are not retroactively affected by later additions
    pub fn calendar(&self) -> BusinessCalendar {
        BusinessCalendar::from_holidays(&self.holidays)
    }

    // --- lookups ----------------------------------------------------------

    pub fn agent(&self, id: AgentId) -> Result<&Agent> {
        self.agents.get(&id).ok_or(LedgerError::UnknownAgent { id })
    }

    pub fn customer(&self, id: CustomerId) -> Result<&Customer> {
        self.customers
            .get(&id)
            .ok_or(LedgerError::UnknownCustomer { id })
    }

    pub fn loan(&self, id: LoanId) -> Result<&Loan> {
        self.loans.get(&id).ok_or(LedgerError::UnknownLoan { id })
    }

    pub fn transfer(&self, id: TransferId) -> Result<&TransferRequest> {
        self.transfers
            .get(&id)
            .ok_or(LedgerError::UnknownTransfer { id })
    }

    pub fn repayments_for(&self, loan_id: LoanId) -> impl Iterator<Item = &Repayment> {
        self.repayments
            .range((loan_id, NaiveDate::MIN)..=(loan_id, NaiveDate::MAX))
            .map(|(_, r)| r)
    }

    /// derived, never stored: does the customer hold an active loan
    pub fn has_active_loan(&self, customer_id: CustomerId) -> bool {
        self.loans
            .values()
            .any(|l| l.customer_id == customer_id && l.status == LoanStatus::Active)
    }

    // --- qualification ----------------------------------------------------

    /// principal bounds for an applicant; falls back to the configured
    /// min/max when there is no customer context yet
    pub fn qualification_range(
        &self,
        customer_id: Option<CustomerId>,
    ) -> Result<QualificationRange> {
        match customer_id {
            Some(id) => Ok(self.customer(id)?.loan_range()),
            None => Ok(QualificationRange::from_settings(&self.settings)),
        }
    }

    // --- agent balance ----------------------------------------------------

    /// admin tops up an agent's float
    pub fn grant_funds(&mut self, agent_id: AgentId, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::Validation {
                message: format!("grant amount must be greater than zero, got {}", amount),
            });
        }
        let agent = self
            .agents
            .get_mut(&agent_id)
            .ok_or(LedgerError::UnknownAgent { id: agent_id })?;

        agent.credit(amount);
        let new_balance = agent.amount_in_hand;
        self.events.emit(Event::FundsGranted {
            agent_id,
            amount,
            new_balance,
        });
        Ok(())
    }

    // --- loan origination -------------------------------------------------

    /// accept a loan offer for a qualified customer
    ///
    /// rejects before any state changes when the customer still holds an
    /// active loan or the principal falls outside their qualification range;
    /// on success the disbursing agent's balance drops by the principal
    pub fn offer_loan(
        &mut self,
        customer_id: CustomerId,
        agent_id: AgentId,
        principal: Money,
        interest_rate: Rate,
        duration_days: u32,
        time: &SafeTimeProvider,
    ) -> Result<LoanId> {
        self.customer(customer_id)?;
        self.agent(agent_id)?;

        if self.has_active_loan(customer_id) {
            return Err(LedgerError::ActiveLoanExists { customer_id });
        }

        let range = self.qualification_range(Some(customer_id))?;
        if !range.contains(principal) {
            return Err(LedgerError::PrincipalOutOfRange {
                requested: principal,
                min: range.lower,
                max: range.upper,
            });
        }

        let calendar = self.calendar();
        let loan = Loan::originate(
            customer_id,
            principal,
            interest_rate,
            duration_days,
            time.now().date_naive(),
            &calendar,
        )?;
        let loan_id = loan.id;

        self.events.emit(Event::LoanCreated {
            loan_id,
            customer_id,
            principal,
            total_due: loan.total_due,
            daily_payment: loan.daily_payment,
            start_date: loan.start_date,
            end_date: loan.end_date,
        });
        self.loans.insert(loan_id, loan);

        let agent = self
            .agents
            .get_mut(&agent_id)
            .ok_or(LedgerError::UnknownAgent { id: agent_id })?;
        agent.debit(principal);
        self.events.emit(Event::FundsDisbursed {
            loan_id,
            agent_id,
            amount: principal,
        });

        Ok(loan_id)
    }

    // --- repayment recording ----------------------------------------------

    /// record one day's collection against a loan
    ///
    /// the repayment insert, the loan totals and the agent balance move
    /// together or not at all: every guard runs before the first mutation,
    /// and the `(loan, date)` key makes the same-day duplicate check part of
    /// the insert itself
    pub fn record_payment(
        &mut self,
        loan_id: LoanId,
        agent_id: AgentId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<RepaymentId> {
        let today = time.now().date_naive();

        if !amount.is_positive() {
            return Err(LedgerError::Validation {
                message: format!("payment amount must be greater than zero, got {}", amount),
            });
        }
        self.agent(agent_id)?;
        let loan = self.loan(loan_id)?;
        if loan.status != LoanStatus::Active {
            return Err(LedgerError::LoanNotActive {
                status: loan.status,
            });
        }
        let customer_id = loan.customer_id;
        self.customer(customer_id)?;

        if self.repayments.contains_key(&(loan_id, today)) {
            return Err(LedgerError::DuplicatePayment {
                loan_id,
                date: today,
            });
        }

        // all guards passed, apply the three-way mutation
        let repayment = Repayment {
            id: Uuid::new_v4(),
            loan_id,
            recorded_by: agent_id,
            date: today,
            amount_paid: amount,
        };
        let repayment_id = repayment.id;
        self.repayments.insert((loan_id, today), repayment);

        let loan = self
            .loans
            .get_mut(&loan_id)
            .ok_or(LedgerError::UnknownLoan { id: loan_id })?;
        let completed = loan.apply_payment(amount, today);
        let remaining_balance = loan.remaining_balance();
        let total_paid = loan.total_paid;

        let agent = self
            .agents
            .get_mut(&agent_id)
            .ok_or(LedgerError::UnknownAgent { id: agent_id })?;
        agent.credit(amount);

        self.events.emit(Event::PaymentReceived {
            repayment_id,
            loan_id,
            agent_id,
            amount,
            date: today,
            remaining_balance,
        });

        if completed {
            self.events.emit(Event::LoanCompleted {
                loan_id,
                customer_id,
                total_paid,
                completed_on: today,
            });
            self.adjust_credit_score(loan_id, customer_id, today)?;
        }

        Ok(repayment_id)
    }

    /// run the scoring engine for a just-completed loan
    fn adjust_credit_score(
        &mut self,
        loan_id: LoanId,
        customer_id: CustomerId,
        today: NaiveDate,
    ) -> Result<()> {
        let loan = self.loan(loan_id)?.clone();
        let customer = self
            .customers
            .get_mut(&customer_id)
            .ok_or(LedgerError::UnknownCustomer { id: customer_id })?;

        if let Some(adjustment) = scoring::score_completed_loan(customer, &loan, today) {
            let new_score = customer.credit_score;
            self.events.emit(Event::CreditScoreAdjusted {
                customer_id,
                loan_id,
                adjustment,
                new_score,
            });
        }
        Ok(())
    }

    // --- cash-transfer workflow -------------------------------------------

    /// agent asks to hand cash over to the admin; nothing is debited yet
    pub fn request_transfer(
        &mut self,
        agent_id: AgentId,
        amount: Money,
        time: &SafeTimeProvider,
    ) -> Result<TransferId> {
        if !amount.is_positive() {
            return Err(LedgerError::Validation {
                message: format!("transfer amount must be greater than zero, got {}", amount),
            });
        }
        let agent = self.agent(agent_id)?;
        if amount > agent.amount_in_hand {
            return Err(LedgerError::InsufficientBalance {
                available: agent.amount_in_hand,
                requested: amount,
            });
        }

        let request = TransferRequest::new(agent_id, amount, time.now().date_naive());
        let transfer_id = request.id;
        self.transfers.insert(transfer_id, request);
        self.events.emit(Event::TransferRequested {
            transfer_id,
            agent_id,
            amount,
        });
        Ok(transfer_id)
    }

    /// admin resolves a pending request; approval debits the agent by the
    /// actual amount received (or the requested amount if uncorrected)
    pub fn resolve_transfer(&mut self, transfer_id: TransferId, action: TransferAction) -> Result<()> {
        let agent_id = self.transfer(transfer_id)?.agent_id;
        self.agent(agent_id)?;

        let request = self
            .transfers
            .get_mut(&transfer_id)
            .ok_or(LedgerError::UnknownTransfer { id: transfer_id })?;
        let debit = request.resolve(action)?;
        let note = request.rejection_note.clone();

        match debit {
            Some(amount) => {
                let agent = self
                    .agents
                    .get_mut(&agent_id)
                    .ok_or(LedgerError::UnknownAgent { id: agent_id })?;
                agent.debit(amount);
                let new_balance = agent.amount_in_hand;
                self.events.emit(Event::TransferApproved {
                    transfer_id,
                    agent_id,
                    amount,
                    new_balance,
                });
            }
            None => {
                self.events.emit(Event::TransferRejected {
                    transfer_id,
                    agent_id,
                    note: note.unwrap_or_default(),
                });
            }
        }
        Ok(())
    }

    // --- dashboard --------------------------------------------------------

    /// collection figures an agent sees at the start of their rounds
    pub fn daily_summary(&self, agent_id: AgentId, time: &SafeTimeProvider) -> Result<DailySummary> {
        let agent = self.agent(agent_id)?;
        let today = time.now().date_naive();

        let active: Vec<&Loan> = self
            .loans
            .values()
            .filter(|l| l.status == LoanStatus::Active)
            .filter(|l| {
                self.customers
                    .get(&l.customer_id)
                    .is_some_and(|c| c.agent_id == agent_id)
            })
            .collect();

        let due_today = active.iter().filter(|l| l.is_due_today(today)).count();
        let amount_to_collect = active
            .iter()
            .fold(Money::ZERO, |sum, l| sum + l.daily_payment);

        let mut amount_collected = Money::ZERO;
        let mut loans_collected = 0usize;
        for loan in &active {
            if let Some(repayment) = self.repayments.get(&(loan.id, today)) {
                amount_collected += repayment.amount_paid;
                loans_collected += 1;
            }
        }

        let loan_collection_rate = percent_of(
            Decimal::from(loans_collected as u64),
            Decimal::from(active.len() as u64),
        );
        let amount_collection_rate = percent_of(
            amount_collected.as_decimal(),
            amount_to_collect.as_decimal(),
        );

        Ok(DailySummary {
            active_loans: active.len(),
            due_today,
            amount_to_collect,
            amount_collected,
            loans_collected,
            loan_collection_rate,
            amount_collection_rate,
            amount_in_hand: agent.amount_in_hand,
        })
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        (part / whole * Decimal::from(100)).round_dp(2)
    }
}
