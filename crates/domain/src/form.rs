// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Return form layout and field validation.
//!
//! A submitted form is a flat map from field key to the raw string the
//! officer typed, e.g. `child_labour.rescued_haz -> "4"`. Every field is
//! validated and all failures are collected into a per-field message map so
//! the form can show them next to the inputs. Any failure blocks the
//! submission.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::returns::{
    ActCaseRow, BondedLabour, ChildLabour, Enforcement, Grievances, IndustrialDisputes,
    ReturnSections, StatuteAct, SupervisoryConfirmation,
};
use crate::role::Role;

/// Field key to user-facing error message.
pub type FieldErrors = BTreeMap<String, String>;

const NOT_A_COUNT: &str = "Must be a whole number of zero or more";
const COUNT_TOO_LARGE: &str = "Value is too large";
const NOT_A_FLAG: &str = "Must be yes or no";
const UNKNOWN_FIELD: &str = "Unknown field for this return";
const REMARKS_REQUIRED: &str =
    "Remarks are mandatory when closing pendency has increased over the previous month";

/// The input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A non-negative integer count.
    Count,
    /// A yes/no confirmation.
    Flag,
}

/// One input on a return form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
}

/// A titled group of fields sharing a key prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSection {
    pub title: String,
    pub fields: Vec<FormField>,
}

type Columns = [(&'static str, &'static str)];

const CHILD_LABOUR: &Columns = &[
    ("identified_haz", "Children identified (hazardous)"),
    ("identified_non_haz", "Children identified (non-hazardous)"),
    ("rescued_haz", "Children rescued (hazardous)"),
    ("rescued_non_haz", "Children rescued (non-hazardous)"),
    ("comp_settled_20k", "Rs. 20,000 compensation settled"),
    ("comp_paid", "Compensation paid"),
    ("comp_pending", "Compensation pending"),
    ("prosecutions_filed", "Prosecutions filed"),
    ("pending_end_of_month", "Pending at end of month"),
];

const ENFORCEMENT: &Columns = &[
    ("allotted", "Inspections allotted"),
    ("conducted", "Inspections conducted"),
    ("not_conducted", "Inspections not conducted"),
    ("pros_pending_start", "Prosecutions pending at start"),
    ("pros_filed", "Prosecutions filed"),
    ("pros_disposed", "Prosecutions disposed"),
    ("pros_pending_end", "Prosecutions pending at end"),
];

const BONDED_LABOUR: &Columns = &[
    ("cases_identified", "Cases identified"),
    ("persons_released", "Persons released"),
    ("rehabilitation_initiated", "Rehabilitation initiated"),
];

const ACT_ROW: &Columns = &[
    ("pending_beginning", "Pending at beginning"),
    ("filed", "Filed during month"),
    ("disposed", "Disposed during month"),
    ("pending_end", "Pending at end"),
    ("workers_benefitted", "Workers benefitted"),
    ("cases_reserved", "Cases reserved for orders"),
];

const UNION_DISPUTES: &Columns = &[
    ("union_pending_start", "Union disputes pending at start"),
    ("union_received", "Union disputes received"),
    ("union_settled_joint", "Settled by joint memorandum"),
    ("union_settled_12_3", "Settled under 12(3)"),
    ("union_failures_12_4", "Failure reports under 12(4)"),
    ("union_pending_end", "Union disputes pending at end"),
];

const INDIVIDUAL_DISPUTES: &Columns = &[
    ("indiv_pending_start", "Individual disputes pending at start"),
    ("indiv_received", "Individual disputes received"),
    ("indiv_settled", "Individual disputes settled"),
    ("indiv_failures_referred", "Failures referred"),
    ("indiv_pending_end", "Individual disputes pending at end"),
];

const SUPERVISORY: &Columns = &[
    ("all_alo_reports_received", "All ALO reports received"),
    ("all_acl_reports_received", "All ACL reports received"),
];

const GRIEVANCES: &Columns = &[
    ("pending_start", "Opening balance"),
    ("received", "Received"),
    ("disposed", "Disposed"),
    ("pending_end", "Closing balance"),
];

fn section(title: &str, prefix: &str, columns: &Columns, kind: FieldKind) -> FormSection {
    FormSection {
        title: title.to_string(),
        fields: columns
            .iter()
            .map(|(name, label)| FormField {
                key: format!("{prefix}.{name}"),
                label: (*label).to_string(),
                kind,
            })
            .collect(),
    }
}

/// The form sections an officer of `role` fills in.
///
/// Supervisory roles file nothing and get an empty layout.
#[must_use]
pub fn form_layout(role: Role) -> Vec<FormSection> {
    let mut sections: Vec<FormSection> = Vec::new();

    match role {
        Role::Alo => {
            sections.push(section(
                "A. Child Labour",
                "child_labour",
                CHILD_LABOUR,
                FieldKind::Count,
            ));
            sections.push(section(
                "B. Inspections & Prosecutions",
                "enforcement",
                ENFORCEMENT,
                FieldKind::Count,
            ));
            sections.push(section(
                "C. Bonded Labour",
                "bonded_labour",
                BONDED_LABOUR,
                FieldKind::Count,
            ));
        }
        Role::Acl | Role::Dcl => {
            for act in StatuteAct::for_role(role) {
                sections.push(section(
                    &format!("A. {}", act.title()),
                    &format!("act_judicial_work.{}", act.key()),
                    ACT_ROW,
                    FieldKind::Count,
                ));
            }
            if role == Role::Dcl {
                sections.push(section(
                    "C. Supervisory Confirmation",
                    "supervisory",
                    SUPERVISORY,
                    FieldKind::Flag,
                ));
            }
        }
        Role::Jcl => {
            sections.push(section(
                "A. Union Disputes",
                "industrial_disputes",
                UNION_DISPUTES,
                FieldKind::Count,
            ));
            sections.push(section(
                "B. Individual Disputes",
                "industrial_disputes",
                INDIVIDUAL_DISPUTES,
                FieldKind::Count,
            ));
        }
        Role::Commissioner | Role::Admin => return sections,
    }

    sections.push(section(
        "G. Public Grievances",
        "grievances",
        GRIEVANCES,
        FieldKind::Count,
    ));
    sections
}

/// Validates a single count field.
///
/// Surrounding whitespace is ignored and an empty value counts as zero.
///
/// # Errors
///
/// Returns a user-facing message if the value is negative, fractional,
/// non-numeric, or does not fit in a `u32`.
pub fn validate_numeric_field(raw: &str) -> Result<u32, String> {
    let value: &str = raw.trim();
    if value.is_empty() {
        return Ok(0);
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(String::from(NOT_A_COUNT));
    }
    value
        .parse::<u32>()
        .map_err(|_| String::from(COUNT_TOO_LARGE))
}

/// Validates a yes/no field. An empty value counts as no.
///
/// # Errors
///
/// Returns a user-facing message for anything other than
/// `yes`/`no`/`true`/`false`.
pub fn validate_flag_field(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "no" | "false" => Ok(false),
        "yes" | "true" => Ok(true),
        _ => Err(String::from(NOT_A_FLAG)),
    }
}

#[derive(Default)]
struct ParsedFields {
    counts: BTreeMap<String, u32>,
    flags: BTreeMap<String, bool>,
}

impl ParsedFields {
    fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }
}

/// Parses and validates a submitted return form for an officer of `role`.
///
/// Fields missing from `fields` are treated as empty, i.e. zero.
///
/// # Errors
///
/// Returns every field error found. Keys that do not belong to the role's
/// form are errors too.
pub fn parse_return_form(
    role: Role,
    fields: &BTreeMap<String, String>,
) -> Result<ReturnSections, FieldErrors> {
    let layout: Vec<FormField> = form_layout(role)
        .into_iter()
        .flat_map(|section| section.fields)
        .collect();

    let mut errors: FieldErrors = FieldErrors::new();
    for key in fields.keys() {
        if !layout.iter().any(|field| &field.key == key) {
            errors.insert(key.clone(), String::from(UNKNOWN_FIELD));
        }
    }

    let mut parsed: ParsedFields = ParsedFields::default();
    for field in &layout {
        let raw: &str = fields.get(&field.key).map_or("", String::as_str);
        let outcome: Result<(), String> = match field.kind {
            FieldKind::Count => validate_numeric_field(raw).map(|value| {
                parsed.counts.insert(field.key.clone(), value);
            }),
            FieldKind::Flag => validate_flag_field(raw).map(|value| {
                parsed.flags.insert(field.key.clone(), value);
            }),
        };
        if let Err(message) = outcome {
            errors.insert(field.key.clone(), message);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(build_sections(role, &parsed))
}

fn build_sections(role: Role, parsed: &ParsedFields) -> ReturnSections {
    let grievances: Grievances = Grievances {
        pending_start: parsed.count("grievances.pending_start"),
        received: parsed.count("grievances.received"),
        disposed: parsed.count("grievances.disposed"),
        pending_end: parsed.count("grievances.pending_end"),
    };

    let mut sections: ReturnSections = ReturnSections {
        grievances,
        ..ReturnSections::default()
    };

    match role {
        Role::Alo => {
            sections.child_labour = Some(ChildLabour {
                identified_haz: parsed.count("child_labour.identified_haz"),
                identified_non_haz: parsed.count("child_labour.identified_non_haz"),
                rescued_haz: parsed.count("child_labour.rescued_haz"),
                rescued_non_haz: parsed.count("child_labour.rescued_non_haz"),
                comp_settled_20k: parsed.count("child_labour.comp_settled_20k"),
                comp_paid: parsed.count("child_labour.comp_paid"),
                comp_pending: parsed.count("child_labour.comp_pending"),
                prosecutions_filed: parsed.count("child_labour.prosecutions_filed"),
                pending_end_of_month: parsed.count("child_labour.pending_end_of_month"),
            });
            sections.enforcement = Some(Enforcement {
                allotted: parsed.count("enforcement.allotted"),
                conducted: parsed.count("enforcement.conducted"),
                not_conducted: parsed.count("enforcement.not_conducted"),
                pros_pending_start: parsed.count("enforcement.pros_pending_start"),
                pros_filed: parsed.count("enforcement.pros_filed"),
                pros_disposed: parsed.count("enforcement.pros_disposed"),
                pros_pending_end: parsed.count("enforcement.pros_pending_end"),
            });
            sections.bonded_labour = Some(BondedLabour {
                cases_identified: parsed.count("bonded_labour.cases_identified"),
                persons_released: parsed.count("bonded_labour.persons_released"),
                rehabilitation_initiated: parsed.count("bonded_labour.rehabilitation_initiated"),
            });
        }
        Role::Acl | Role::Dcl => {
            sections.act_judicial_work = StatuteAct::for_role(role)
                .iter()
                .map(|act| {
                    let prefix: String = format!("act_judicial_work.{}", act.key());
                    let col = |name: &str| parsed.count(&format!("{prefix}.{name}"));
                    ActCaseRow {
                        act: *act,
                        pending_beginning: col("pending_beginning"),
                        filed: col("filed"),
                        disposed: col("disposed"),
                        pending_end: col("pending_end"),
                        workers_benefitted: col("workers_benefitted"),
                        cases_reserved: col("cases_reserved"),
                    }
                })
                .collect();
            if role == Role::Dcl {
                sections.supervisory = Some(SupervisoryConfirmation {
                    all_alo_reports_received: parsed.flag("supervisory.all_alo_reports_received"),
                    all_acl_reports_received: parsed.flag("supervisory.all_acl_reports_received"),
                });
            }
        }
        Role::Jcl => {
            sections.industrial_disputes = Some(IndustrialDisputes {
                union_pending_start: parsed.count("industrial_disputes.union_pending_start"),
                union_received: parsed.count("industrial_disputes.union_received"),
                union_settled_joint: parsed.count("industrial_disputes.union_settled_joint"),
                union_settled_12_3: parsed.count("industrial_disputes.union_settled_12_3"),
                union_failures_12_4: parsed.count("industrial_disputes.union_failures_12_4"),
                union_pending_end: parsed.count("industrial_disputes.union_pending_end"),
                indiv_pending_start: parsed.count("industrial_disputes.indiv_pending_start"),
                indiv_received: parsed.count("industrial_disputes.indiv_received"),
                indiv_settled: parsed.count("industrial_disputes.indiv_settled"),
                indiv_failures_referred: parsed
                    .count("industrial_disputes.indiv_failures_referred"),
                indiv_pending_end: parsed.count("industrial_disputes.indiv_pending_end"),
            });
        }
        Role::Commissioner | Role::Admin => {}
    }

    sections
}

/// Enforces the remarks rule: when closing grievance pendency rises over the
/// officer's previous month, the officer must explain why.
///
/// # Errors
///
/// Returns a `remarks` field error when pendency rose and remarks are blank.
pub fn check_remarks_requirement(
    sections: &ReturnSections,
    remarks: &str,
    previous: Option<&ReturnSections>,
) -> Result<(), FieldErrors> {
    let Some(previous) = previous else {
        return Ok(());
    };
    if sections.grievances.pending_end > previous.grievances.pending_end
        && remarks.trim().is_empty()
    {
        let mut errors: FieldErrors = FieldErrors::new();
        errors.insert(String::from("remarks"), String::from(REMARKS_REQUIRED));
        return Err(errors);
    }
    Ok(())
}
