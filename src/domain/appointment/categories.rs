//! Categorical attributes drawn uniformly by the generator.

use super::macros::categorical;

categorical! {
    /// Hospital department handling the appointment.
    Department, field = "department" {
        Cardiology => "Cardiology",
        Neurology => "Neurology",
        Orthopedics => "Orthopedics",
        Pediatrics => "Pediatrics",
        Dermatology => "Dermatology",
        Oncology => "Oncology",
        Radiology => "Radiology",
    }
}

categorical! {
    /// City of the facility.
    City, field = "city" {
        NewYork => "New York",
        Chicago => "Chicago",
        LosAngeles => "Los Angeles",
        Houston => "Houston",
        Phoenix => "Phoenix",
        Boston => "Boston",
        Seattle => "Seattle",
    }
}

categorical! {
    /// How the appointment is paid for.
    PaymentMethod, field = "payment_method" {
        Insurance => "Insurance",
        SelfPay => "Self-Pay",
        Medicare => "Medicare",
        Medicaid => "Medicaid",
    }
}

categorical! {
    /// Clinical urgency of the appointment.
    Urgency, field = "urgency" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

impl PaymentMethod {
    /// Self-paying patients never carry a copay.
    pub fn carries_copay(&self) -> bool {
        !matches!(self, PaymentMethod::SelfPay)
    }
}
