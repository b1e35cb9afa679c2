use uuid::Uuid;

use crate::{
    Collection, Engine, EngineError, Payment, PaymentStatus, RecordPayment, ResultEngine,
};

use super::normalize_optional_text;

impl Engine {
    /// Append a payment to the ledger.
    ///
    /// The resident must exist but may be inactive: a departed resident can
    /// still settle dues. Duplicate entries for the same resident and month
    /// are allowed by design.
    pub fn record_payment(&mut self, cmd: RecordPayment) -> ResultEngine<Uuid> {
        if self
            .residents
            .iter()
            .all(|resident| resident.id != cmd.resident_id)
        {
            return Err(EngineError::ResidentNotFound(cmd.resident_id.to_string()));
        }
        if cmd.amount_minor < 0 {
            return Err(EngineError::Validation(format!(
                "payment amount must be >= 0, got {}",
                cmd.amount_minor
            )));
        }

        let payment = Payment {
            id: Uuid::new_v4(),
            resident_id: cmd.resident_id,
            amount_minor: cmd.amount_minor,
            paid_on: cmd.paid_on,
            kind: cmd.kind,
            month: cmd.month,
            status: cmd.status,
            note: normalize_optional_text(cmd.note.as_deref()),
        };
        let id = payment.id;
        self.payments.push(payment);

        self.persist(&[Collection::Payments]);
        Ok(id)
    }

    /// Correct an existing ledger entry.
    ///
    /// `id` and `resident_id` are taken from the stored record: a correction
    /// may change amount, date, kind, month, status and note, never the
    /// owner.
    pub fn update_payment(&mut self, payment: Payment) -> ResultEngine<()> {
        if payment.amount_minor < 0 {
            return Err(EngineError::Validation(format!(
                "payment amount must be >= 0, got {}",
                payment.amount_minor
            )));
        }

        let stored = self
            .payments
            .iter_mut()
            .find(|stored| stored.id == payment.id)
            .ok_or_else(|| EngineError::PaymentNotFound(payment.id.to_string()))?;

        stored.amount_minor = payment.amount_minor;
        stored.paid_on = payment.paid_on;
        stored.kind = payment.kind;
        stored.month = payment.month;
        stored.status = payment.status;
        stored.note = payment.note;

        self.persist(&[Collection::Payments]);
        Ok(())
    }

    /// Explicit status transition ({pending, overdue} ⇄ paid). Setting the
    /// status a payment already has is a harmless no-op on the record.
    pub fn set_payment_status(&mut self, id: Uuid, status: PaymentStatus) -> ResultEngine<()> {
        let payment = self
            .payments
            .iter_mut()
            .find(|payment| payment.id == id)
            .ok_or_else(|| EngineError::PaymentNotFound(id.to_string()))?;

        payment.status = status;
        self.persist(&[Collection::Payments]);
        Ok(())
    }
}
