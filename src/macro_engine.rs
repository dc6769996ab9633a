//! Arithmetic macro engine - parameterised formulas fed by prompts.
//!
//! Each [`MacroId`] carries its label, prompts and formula. The
//! [`MacroContext`] collects parameters one `submit_param` at a time and
//! computes the result once the last one arrives.
//!
//! ```text
//! Idle ──open_menu──► MenuOpen ──start──► AwaitingInput ──last param──► Complete
//!   ▲                                                                      │
//!   └──────────────────────────── cancel (from any state) ◄────────────────┘
//! ```

/// Most parameters any macro takes.
pub const MAX_PARAMS: usize = 4;

/// Catalog of available formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroId {
    TaxAdd,
    TaxRemove,
    Percent,
    Markup,
    Discount,
    Compound,
}

impl MacroId {
    /// Menu order. Stable; the menu cursor indexes into it.
    pub const CATALOG: [MacroId; 6] = [
        MacroId::TaxAdd,
        MacroId::TaxRemove,
        MacroId::Percent,
        MacroId::Markup,
        MacroId::Discount,
        MacroId::Compound,
    ];

    /// Short label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            MacroId::TaxAdd => "TAX+",
            MacroId::TaxRemove => "TAX-",
            MacroId::Percent => "PCT",
            MacroId::Markup => "MRKUP",
            MacroId::Discount => "DISC",
            MacroId::Compound => "CMPND",
        }
    }

    /// Longer description for the menu.
    pub fn title(&self) -> &'static str {
        match self {
            MacroId::TaxAdd => "Add tax",
            MacroId::TaxRemove => "Remove tax",
            MacroId::Percent => "Percent of",
            MacroId::Markup => "Markup",
            MacroId::Discount => "Discount",
            MacroId::Compound => "Compound",
        }
    }

    pub fn prompts(&self) -> &'static [&'static str] {
        match self {
            MacroId::TaxAdd => &["Amount?", "Tax %?"],
            MacroId::TaxRemove => &["Total?", "Tax %?"],
            MacroId::Percent => &["Amount?", "Percent?"],
            MacroId::Markup => &["Cost?", "Markup %?"],
            MacroId::Discount => &["Price?", "Discount %?"],
            MacroId::Compound => &["Principal?", "Rate %?", "Periods?"],
        }
    }

    pub fn param_count(&self) -> usize {
        self.prompts().len()
    }

    /// Evaluate the formula. `params` must hold `param_count()` values.
    pub fn compute(&self, params: &[f64]) -> f64 {
        let arg = |i: usize| params.get(i).copied().unwrap_or(0.0);
        let rate = arg(1) / 100.0;
        match self {
            MacroId::TaxAdd | MacroId::Markup => arg(0) * (1.0 + rate),
            MacroId::TaxRemove => arg(0) / (1.0 + rate),
            MacroId::Percent => arg(0) * rate,
            MacroId::Discount => arg(0) * (1.0 - rate),
            MacroId::Compound => arg(0) * libm::pow(1.0 + rate, arg(2)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroState {
    Idle,
    MenuOpen,
    AwaitingInput,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MacroContext {
    state: MacroState,
    macro_id: Option<MacroId>,
    params: heapless::Vec<f64, MAX_PARAMS>,
    result: f64,
}

impl Default for MacroContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroContext {
    pub const fn new() -> Self {
        Self {
            state: MacroState::Idle,
            macro_id: None,
            params: heapless::Vec::new(),
            result: 0.0,
        }
    }

    pub fn state(&self) -> MacroState {
        self.state
    }

    pub fn macro_id(&self) -> Option<MacroId> {
        self.macro_id
    }

    /// Parameters collected so far (the collection cursor).
    pub fn param_index(&self) -> usize {
        self.params.len()
    }

    pub fn param_count(&self) -> usize {
        self.macro_id.map_or(0, |id| id.param_count())
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// The computed value, only once every parameter is in.
    pub fn result(&self) -> Option<f64> {
        (self.state == MacroState::Complete).then_some(self.result)
    }

    /// Enter menu selection, dropping any partial input.
    pub fn open_menu(&mut self) {
        self.cancel();
        self.state = MacroState::MenuOpen;
    }

    pub fn start(&mut self, id: MacroId) {
        self.macro_id = Some(id);
        self.params.clear();
        self.result = 0.0;
        self.state = MacroState::AwaitingInput;
        info!("macro {} started", id.label());
    }

    /// Record the next parameter. Returns true once the macro is complete.
    ///
    /// Outside `AwaitingInput` this does nothing and returns false.
    pub fn submit_param(&mut self, value: f64) -> bool {
        let Some(id) = self.macro_id else {
            return false;
        };
        if self.state != MacroState::AwaitingInput {
            return false;
        }
        if self.params.push(value).is_err() {
            return false;
        }
        if self.params.len() < id.param_count() {
            return false;
        }
        self.result = id.compute(&self.params);
        self.state = MacroState::Complete;
        info!("macro {} complete", id.label());
        true
    }

    /// Prompt for the next parameter, or `""` when not collecting input.
    pub fn current_prompt(&self) -> &'static str {
        match (self.state, self.macro_id) {
            (MacroState::AwaitingInput, Some(id)) => {
                id.prompts().get(self.params.len()).copied().unwrap_or("")
            }
            _ => "",
        }
    }

    /// Back to `Idle`, discarding everything. Safe from any state.
    pub fn cancel(&mut self) {
        self.state = MacroState::Idle;
        self.macro_id = None;
        self.params.clear();
        self.result = 0.0;
    }
}
