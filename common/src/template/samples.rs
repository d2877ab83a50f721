//! Built-in templates offered instead of an upload.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub id: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        id: "invoice",
        title: "Invoice",
        text: "INVOICE {{invoice_number}}\n\
               Date: {{invoice_date}}\n\
               Bill to: {{customer_name}} <{{customer_email}}>\n\
               {{billing_address}}\n\n\
               {{#each items}}- {{description}}: {{quantity}} x {{unit_price}} = {{total}}\n{{/each}}\n\
               Grand total: {{grand_total}}\n\
               Notes: {{notes}}\n",
    },
    Sample {
        id: "review_request",
        title: "Review request",
        text: "Hi {{customer_name}},\n\n\
               Thanks for visiting {{business_name}} on {{visit_date}}.\n\
               How did we do? Reply to {{reply_email}} or leave a few words below.\n\n\
               {{review_description}}\n",
    },
    Sample {
        id: "timesheet",
        title: "Timesheet",
        text: "Timesheet for {{employee_name}} ({{employee_email}})\n\
               Week starting {{week_start_date}}\n\n\
               {{#each entries}}{{work_date}} {{task_description}}: {{hours}} h at {{hourly_rate}}\n{{/each}}",
    },
];

pub fn sample(id: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.id == id)
}
