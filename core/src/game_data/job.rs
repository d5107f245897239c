use serde::{Deserialize, Serialize};

/// Player job/class identity as reported by player snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Job {
    #[default]
    None,
    Gla, Pgl, Mrd, Lnc, Arc, Cnj, Thm,
    Pld, Mnk, War, Drg, Brd, Whm, Blm,
    Acn, Smn, Sch,
    Rog, Nin,
    Mch, Drk, Ast,
    Sam, Rdm, Blu,
    Gnb, Dnc,
    Crp, Bsm, Arm, Gsm, Ltw, Wvr, Alc, Cul,
    Min, Btn, Fsh,
}

impl Job {
    pub fn is_crafting(self) -> bool {
        matches!(
            self,
            Job::Crp | Job::Bsm | Job::Arm | Job::Gsm | Job::Ltw | Job::Wvr | Job::Alc | Job::Cul
        )
    }

    pub fn is_gathering(self) -> bool {
        matches!(self, Job::Min | Job::Btn | Job::Fsh)
    }
}
